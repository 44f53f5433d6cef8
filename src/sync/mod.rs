//! State synchronisation between clients.
//!
//! ## Flow
//!
//! 1. A local command mutates the board
//! 2. `Snapshot::masked` hides hand and deck contents
//! 3. The snapshot goes out as `Outbound::UpdateCards`
//! 4. Each receiver replaces its `Mirror` of the sender wholesale
//!
//! The one cross-board write is challenge damage, which travels as a message
//! and is applied by the card's owner.

pub mod codec;
mod dispatch;
pub mod message;
pub mod mirror;
pub mod snapshot;

pub use codec::{decode, encode, WireError};
pub use message::{Inbound, Outbound};
pub use mirror::{Mirror, Mirrors};
pub use snapshot::Snapshot;
