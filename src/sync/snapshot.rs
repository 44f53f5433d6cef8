//! Masked board snapshots.
//!
//! Every local mutation produces a whole-board snapshot for the other
//! players. Cards in hidden zones (hand, deck) are swapped for placeholders
//! that keep only uid and zone, so opponents see how many cards sit where
//! but nothing printed on them.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::zones::ZoneManager;

/// Whole-board state as sent to other players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cards: Vec<CardInstance>,
}

impl Snapshot {
    /// Build the masked snapshot of a board.
    #[must_use]
    pub fn masked(zones: &ZoneManager) -> Self {
        let cards: Vec<CardInstance> = zones
            .cards()
            .map(|card| {
                if card.zone().is_hidden() {
                    card.masked()
                } else {
                    card.clone()
                }
            })
            .collect();
        trace!("snapshot of {} cards", cards.len());
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
