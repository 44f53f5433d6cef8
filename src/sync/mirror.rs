//! Read-only mirrors of remote boards.
//!
//! A mirror is rebuilt wholesale from each snapshot its owner sends; there is
//! no merging, since every player is the only writer of their own board.
//! Contents are an `im::Vector`, so handing a mirror to the presentation
//! layer is an O(1) clone.

use im::Vector;
use log::trace;
use rustc_hash::FxHashMap;

use super::snapshot::Snapshot;
use crate::cards::CardInstance;
use crate::core::config::Zone;
use crate::core::entity::CardUid;
use crate::core::player::PeerId;

/// One remote player's board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mirror {
    cards: Vector<CardInstance>,
}

impl Mirror {
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            cards: snapshot.cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<CardInstance> {
        &self.cards
    }

    #[must_use]
    pub fn get(&self, uid: CardUid) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.uid() == uid)
    }

    pub fn cards_in_zone(&self, zone: Zone) -> impl Iterator<Item = &CardInstance> + '_ {
        self.cards.iter().filter(move |c| c.zone() == zone)
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

/// Mirrors of every remote player.
#[derive(Clone, Debug, Default)]
pub struct Mirrors {
    boards: FxHashMap<PeerId, Mirror>,
}

impl Mirrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a player's mirror with a fresh snapshot.
    pub fn replace(&mut self, peer: PeerId, snapshot: Snapshot) {
        trace!("mirror of {} replaced ({} cards)", peer, snapshot.len());
        self.boards.insert(peer, Mirror::from_snapshot(snapshot));
    }

    #[must_use]
    pub fn get(&self, peer: PeerId) -> Option<&Mirror> {
        self.boards.get(&peer)
    }

    /// Find a card in any mirror, with the player holding it.
    #[must_use]
    pub fn find_card(&self, uid: CardUid) -> Option<(PeerId, &CardInstance)> {
        self.boards
            .iter()
            .find_map(|(&peer, mirror)| mirror.get(uid).map(|card| (peer, card)))
    }

    /// Keep only mirrors whose owner passes the predicate.
    pub fn retain(&mut self, mut keep: impl FnMut(PeerId) -> bool) {
        self.boards.retain(|&peer, _| keep(peer));
    }

    pub fn iter(&self) -> impl Iterator<Item = (PeerId, &Mirror)> + '_ {
        self.boards.iter().map(|(&peer, mirror)| (peer, mirror))
    }

    pub fn clear(&mut self) {
        self.boards.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}
