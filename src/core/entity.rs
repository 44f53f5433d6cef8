//! Identifiers for card copies and rooms.
//!
//! ## CardUid
//!
//! Every physical card copy has a `CardUid` that is stable for the lifetime of
//! the copy. Two copies of the same template share a `CardId` but never a
//! `CardUid`.
//!
//! Uids are drawn at random from the session RNG rather than counted up from
//! zero: challenge damage is addressed by uid alone and fanned out to every
//! peer in the room, so sequential ids would collide across boards.
//!
//! ```
//! use lore_table::core::CardUid;
//!
//! let uid = CardUid::new(0xbeef);
//! assert_eq!(uid.raw(), 0xbeef);
//! assert_eq!(format!("{}", uid), "Uid(000000000000beef)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for one physical card copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardUid(pub u64);

impl CardUid {
    /// Create a uid from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw uid value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for CardUid {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Uid({:016x})", self.0)
    }
}

/// Room code handed out by the relay.
///
/// Codes are four decimal digits (1000-9999).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u16);

impl RoomId {
    /// Smallest code the relay hands out.
    pub const MIN: u16 = 1000;

    /// Largest code the relay hands out.
    pub const MAX: u16 = 9999;

    /// Create a room id from a raw code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the raw code.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}
