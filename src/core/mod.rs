//! Core table types: identifiers, players, configuration, RNG and the
//! per-client `Table` with its commands.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{CardUid, RoomId};
pub use player::{PeerId, Player, Team};
pub use rng::GameRng;
pub use config::{GameMode, TableConfig, Zone, ZoneVisibility};
pub use action::Command;
pub use state::Table;
