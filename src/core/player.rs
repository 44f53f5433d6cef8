//! Peer identification, teams and roster entries.
//!
//! ## PeerId
//!
//! The relay assigns every connection a `PeerId`. It is the only identity a
//! client has; player names are display-only and may repeat.
//!
//! ## Player
//!
//! One roster entry as the relay reports it: id, display name, lore total and
//! optional team.

use serde::{Deserialize, Serialize};

/// Relay-assigned connection identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub u32);

impl PeerId {
    /// Id a session uses for itself before the relay assigns one.
    ///
    /// The relay starts numbering at 1, so this never names a real peer.
    pub const LOCAL: PeerId = PeerId(0);

    /// Create a new peer ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Peer {}", self.0)
    }
}

/// Team colour in team game modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// Both teams, in display order.
    pub const ALL: [Team; 2] = [Team::Blue, Team::Red];

    /// Wire/display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Team::Blue => "blue",
            Team::Red => "red",
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Connection id.
    pub id: PeerId,

    /// Display name.
    pub name: String,

    /// Lore total, never negative.
    pub lore: u32,

    /// Team, when one has been assigned.
    pub team: Option<Team>,
}

impl Player {
    /// Create a roster entry with zero lore and no team.
    pub fn new(id: PeerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            lore: 0,
            team: None,
        }
    }

    /// Set the team (builder pattern).
    #[must_use]
    pub fn with_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    /// Set the lore total (builder pattern).
    #[must_use]
    pub fn with_lore(mut self, lore: u32) -> Self {
        self.lore = lore;
        self
    }
}
