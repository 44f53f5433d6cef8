//! The local player's board.
//!
//! `PlayerBoard` wraps the zone manager with the once-per-turn ink limit.

use log::debug;

use super::manager::ZoneManager;
use crate::core::config::Zone;
use crate::core::entity::CardUid;

/// Cards owned by the local player plus per-turn resource flags.
#[derive(Clone, Debug, Default)]
pub struct PlayerBoard {
    pub zones: ZoneManager,
    has_inked_this_turn: bool,
}

impl PlayerBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_inked_this_turn(&self) -> bool {
        self.has_inked_this_turn
    }

    /// Put an inkable card from hand into the inkwell.
    ///
    /// Allowed once per turn. Returns false and changes nothing when the
    /// limit is used up, the card is not inkable, or it is not in hand.
    pub fn ink(&mut self, uid: CardUid) -> bool {
        if self.has_inked_this_turn {
            debug!("already inked this turn, {} stays put", uid);
            return false;
        }
        let Some(card) = self.zones.get(uid) else {
            debug!("ink of unknown {} ignored", uid);
            return false;
        };
        if !card.stats.inkable || card.zone() != Zone::Hand {
            debug!("{} cannot be inked from {}", uid, card.zone());
            return false;
        }

        self.zones.move_card(uid, Zone::Inkwell);
        self.has_inked_this_turn = true;
        true
    }

    /// Clear the ink limit at the end of the owner's turn.
    pub fn reset_ink(&mut self) {
        self.has_inked_this_turn = false;
    }

    /// Remove every card and reset the ink limit.
    pub fn clear(&mut self) {
        self.zones.clear();
        self.has_inked_this_turn = false;
    }
}
