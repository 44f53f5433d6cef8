//! Zone system for card locations.
//!
//! The eight zones are fixed (`Zone`, defined in `core::config`). This
//! module tracks which zone each card copy occupies and enforces the rules
//! that apply when a card changes zone.
//!
//! ## Key Types
//!
//! - `ZoneManager`: Card storage, movement, draw, shuffle, damage
//! - `ZonePosition`: Position specifier for the deck
//! - `PlayerBoard`: Zone manager plus the once-per-turn ink limit

pub mod board;
pub mod manager;

pub use board::PlayerBoard;
pub use manager::{DamageResult, ZoneManager, ZonePosition};

// Re-export zone types from core for convenience
pub use crate::core::config::{Zone, ZoneVisibility};
