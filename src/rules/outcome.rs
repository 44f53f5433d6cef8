//! Game-over state.
//!
//! Only two events end a game: reaching the lore threshold and drawing from
//! an empty deck. The first one to happen is latched for good; a later
//! terminal event or another observation of the threshold changes nothing.

use log::info;
use serde::{Deserialize, Serialize};

/// Result of a finished game, from this client's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => f.write_str("win"),
            Outcome::Loss => f.write_str("loss"),
        }
    }
}

/// Latched terminal state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminal {
    latched: Option<Outcome>,
    dismissed: bool,
}

impl Terminal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a terminal event. Returns true only for the first one.
    pub fn latch(&mut self, outcome: Outcome) -> bool {
        if self.latched.is_some() {
            return false;
        }
        info!("game over: {}", outcome);
        self.latched = Some(outcome);
        true
    }

    /// Outcome to show the user; `None` once dismissed.
    #[must_use]
    pub fn game_over(&self) -> Option<Outcome> {
        if self.dismissed {
            None
        } else {
            self.latched
        }
    }

    /// Outcome that ended the game, dismissed or not.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.latched
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.latched.is_some()
    }

    /// Hide the outcome. The latch stays set.
    pub fn dismiss(&mut self) {
        if self.latched.is_some() {
            self.dismissed = true;
        }
    }
}
