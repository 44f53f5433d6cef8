//! Card instances - one physical card copy.
//!
//! `CardInstance` is a single copy of a template at a specific moment. It
//! carries the template's stats by value, so damaging or exerting one copy
//! never touches a sibling copy of the same template.
//!
//! ## Identity
//!
//! `uid` and `card_id` are fixed at creation and have no setters. Zone,
//! exertion, damage and summoning sickness change only through the zone
//! manager and the challenge resolver.

use serde::{Deserialize, Serialize};

use super::abilities::AbilitySet;
use super::definition::{CardId, CardStats, CardTemplate, CardType};
use crate::core::config::Zone;
use crate::core::entity::CardUid;

/// Display name carried by masked placeholders.
pub const HIDDEN_NAME: &str = "Card";

/// A card copy on a player's board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    uid: CardUid,
    card_id: CardId,

    /// Printed name.
    pub name: String,

    pub card_type: CardType,

    /// Stats copied from the template.
    pub stats: CardStats,

    pub abilities: AbilitySet,

    zone: Zone,
    is_exerted: bool,
    damage: u32,

    /// Entered the board from hand this turn.
    is_new: bool,

    /// Shown as a card back to other players.
    #[serde(default)]
    face_down: bool,
}

impl CardInstance {
    /// Create a fresh copy of a template.
    ///
    /// The copy starts undamaged and without summoning sickness, exerted
    /// only if `zone` exerts on entry.
    #[must_use]
    pub fn from_template(uid: CardUid, template: &CardTemplate, zone: Zone) -> Self {
        Self {
            uid,
            card_id: template.card_id,
            name: template.name.clone(),
            card_type: template.card_type,
            stats: template.stats,
            abilities: template.abilities.clone(),
            zone,
            is_exerted: zone.exerts_on_entry(),
            damage: 0,
            is_new: false,
            face_down: false,
        }
    }

    /// Set the zone (builder pattern).
    #[must_use]
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Set exertion (builder pattern).
    #[must_use]
    pub fn with_exerted(mut self, exerted: bool) -> Self {
        self.is_exerted = exerted;
        self
    }

    /// Set damage (builder pattern).
    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Set summoning sickness (builder pattern).
    #[must_use]
    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn uid(&self) -> CardUid {
        self.uid
    }

    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    #[must_use]
    pub fn is_exerted(&self) -> bool {
        self.is_exerted
    }

    #[must_use]
    pub fn damage(&self) -> u32 {
        self.damage
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.face_down
    }

    /// Damage still needed to banish, `None` for cards without willpower.
    #[must_use]
    pub fn remaining_willpower(&self) -> Option<u32> {
        (self.stats.willpower > 0).then(|| self.stats.willpower.saturating_sub(self.damage))
    }

    /// True once damage has reached willpower.
    ///
    /// Cards with zero willpower (items, actions) are never lethal.
    #[must_use]
    pub fn is_lethal(&self) -> bool {
        self.stats.willpower > 0 && self.damage >= self.stats.willpower
    }

    /// Entered from hand this turn and cannot rush.
    #[must_use]
    pub fn is_summoning_sick(&self) -> bool {
        self.is_new && !self.abilities.has_rush()
    }

    /// Placeholder shown to other players for a card in a hidden zone.
    ///
    /// Keeps `uid` and `zone` so counts and identity survive; everything
    /// printed on the card is dropped.
    #[must_use]
    pub fn masked(&self) -> Self {
        Self {
            uid: self.uid,
            card_id: CardId::HIDDEN,
            name: HIDDEN_NAME.to_string(),
            card_type: CardType::default(),
            stats: CardStats::default(),
            abilities: AbilitySet::new(),
            zone: self.zone,
            is_exerted: false,
            damage: 0,
            is_new: false,
            face_down: true,
        }
    }

    // === Mutation (zone manager and resolver only) ===

    pub(crate) fn set_zone(&mut self, zone: Zone) {
        self.zone = zone;
    }

    pub(crate) fn set_exerted(&mut self, exerted: bool) {
        self.is_exerted = exerted;
    }

    pub(crate) fn set_new(&mut self, is_new: bool) {
        self.is_new = is_new;
    }

    /// Add damage; returns the new total.
    pub(crate) fn add_damage(&mut self, amount: u32) -> u32 {
        self.damage = self.damage.saturating_add(amount);
        self.damage
    }

    /// Remove damage, flooring at 0; returns the new total.
    pub(crate) fn remove_damage(&mut self, amount: u32) -> u32 {
        self.damage = self.damage.saturating_sub(amount);
        self.damage
    }
}
