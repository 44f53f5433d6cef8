//! # lore-table
//!
//! Per-client game-state engine for a card tabletop where peers trust each
//! other and a thin relay keeps their boards in sync.
//!
//! ## Design Principles
//!
//! 1. **Sole writer**: Each client mutates only its own board. Other boards
//!    are mirrors, replaced wholesale from masked snapshots.
//!
//! 2. **Hidden by default**: Hand and deck cards never leave the client with
//!    their identity; snapshots carry only their zone.
//!
//! 3. **Commands run to completion**: A command either applies fully and
//!    queues its outbound messages, or is a no-op.
//!
//! ## Modules
//!
//! - `core`: Identifiers, players, configuration, RNG, `Table` and `Command`
//! - `cards`: Templates, keyword abilities, instances, registry and decks
//! - `zones`: Zone manager and the per-player board
//! - `rules`: Turn machine, lore ledger, outcome latch, challenge combat
//! - `sync`: Wire messages, codec, snapshots, mirrors and inbound dispatch
//! - `relay`: Room registry and an in-process relay
//!
//! ## Example
//!
//! ```
//! use lore_table::{Command, Inbound, LocalRelay, Table};
//!
//! let mut relay = LocalRelay::new(7);
//! let peer = relay.connect();
//!
//! let mut table = Table::default();
//! for message in relay.drain(peer) {
//!     table.handle(message);
//! }
//! assert!(table.is_connected());
//!
//! table.apply(Command::CreateRoom);
//! for message in table.drain_outbox() {
//!     relay.submit(peer, message).unwrap();
//! }
//! assert!(matches!(relay.drain(peer).as_slice(), [Inbound::RoomCreated(_)]));
//! ```

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod sync;
pub mod relay;

// Re-export commonly used types
pub use crate::core::{
    CardUid, RoomId,
    PeerId, Player, Team,
    GameRng,
    GameMode, TableConfig, Zone, ZoneVisibility,
    Command, Table,
};

pub use crate::cards::{
    Ability, AbilitySet, CardId, CardInstance, CardRegistry, CardStats,
    CardTemplate, CardType, DeckEntry, DeckList,
};

pub use crate::zones::{PlayerBoard, ZoneManager, ZonePosition};

pub use crate::rules::{
    ChallengeRejection, ChallengeReport, ChallengeState,
    LoreLedger, Outcome, Terminal, TurnPhase, TurnState,
};

pub use crate::sync::{Inbound, Mirror, Mirrors, Outbound, Snapshot, WireError};

pub use crate::relay::{LocalRelay, RelayError, Room, RoomRegistry};
