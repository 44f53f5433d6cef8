//! Room relay.
//!
//! The relay groups peers into rooms and forwards their messages. It never
//! validates game actions: clients trust each other, and the relay only
//! keeps the roster, game mode, teams and lore totals.
//!
//! - `room`: `Room` and `RoomRegistry`
//! - `hub`: `LocalRelay`, an in-process relay with one inbox per peer

pub mod hub;
pub mod room;

pub use hub::LocalRelay;
pub use room::{RelayError, Room, RoomRegistry, DEFAULT_MAX_PLAYERS};
