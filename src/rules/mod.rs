//! Game rules for one client.
//!
//! - `turn`: Turn/phase state machine with seat rotation
//! - `ledger`: Lore ledger, team lore and the delta rule
//! - `outcome`: Latched game-over state
//! - `combat`: Challenge legality and damage
//!
//! None of these hold card storage; they work on cards owned by the zone
//! manager and on the room roster.

pub mod combat;
pub mod ledger;
pub mod outcome;
pub mod turn;

pub use combat::{
    ChallengeDamage, ChallengeRejection, ChallengeReport, ChallengeState,
};
pub use ledger::{apply_lore_delta, LoreLedger};
pub use outcome::{Outcome, Terminal};
pub use turn::{TurnPhase, TurnState};
