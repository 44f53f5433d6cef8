//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` owns every card copy on one player's board and is the
//! only place their zone changes. It supports:
//! - An ordered deck with explicit position control (last = top)
//! - Unordered zones that keep insertion order for display
//! - Card lookup by uid
//! - Zone rules applied on every move (quest guard, exertion, summoning
//!   sickness, banish on lethal damage)

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::config::Zone;
use crate::core::entity::CardUid;
use crate::core::rng::GameRng;

/// Position for inserting a card into the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Top of the deck (drawn next).
    Top,
    /// Bottom of the deck.
    Bottom,
    /// Insert at specific index (0 = bottom).
    Index(usize),
}

/// Outcome of applying damage to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageResult {
    /// Damage on the card after the change.
    pub total: u32,
    /// The card reached its willpower and went to discard.
    pub banished: bool,
}

/// Manages card copies and their zones.
///
/// ## Usage
///
/// ```
/// use lore_table::cards::{CardId, CardInstance, CardTemplate};
/// use lore_table::core::{CardUid, Zone};
/// use lore_table::zones::{ZoneManager, ZonePosition};
///
/// let template = CardTemplate::new(CardId::new(1), "Pascal").with_willpower(1);
/// let mut manager = ZoneManager::new();
///
/// for uid in [1, 2] {
///     let card = CardInstance::from_template(CardUid(uid), &template, Zone::Deck);
///     manager.insert(card, ZonePosition::Top);
/// }
///
/// assert_eq!(manager.draw(), Some(CardUid(2)));
/// assert_eq!(manager.zone_of(CardUid(2)), Some(Zone::Hand));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card copies by uid.
    cards: FxHashMap<CardUid, CardInstance>,

    /// Insertion order, for stable iteration.
    order: Vec<CardUid>,

    /// Deck stack: index 0 is bottom, last is top.
    deck: Vec<CardUid>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card. `position` only matters when the card is in the deck.
    ///
    /// Returns false (and leaves the manager unchanged) if the uid is
    /// already present.
    pub fn insert(&mut self, card: CardInstance, position: ZonePosition) -> bool {
        let uid = card.uid();
        if self.cards.contains_key(&uid) {
            debug!("{} already on board, insert ignored", uid);
            return false;
        }

        if card.zone() == Zone::Deck {
            self.push_deck(uid, position);
        }
        self.order.push(uid);
        self.cards.insert(uid, card);
        true
    }

    fn push_deck(&mut self, uid: CardUid, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.deck.push(uid),
            ZonePosition::Bottom => self.deck.insert(0, uid),
            ZonePosition::Index(i) => {
                let idx = i.min(self.deck.len());
                self.deck.insert(idx, uid);
            }
        }
    }

    // === Lookup ===

    #[must_use]
    pub fn get(&self, uid: CardUid) -> Option<&CardInstance> {
        self.cards.get(&uid)
    }

    pub(crate) fn get_mut(&mut self, uid: CardUid) -> Option<&mut CardInstance> {
        self.cards.get_mut(&uid)
    }

    #[must_use]
    pub fn contains(&self, uid: CardUid) -> bool {
        self.cards.contains_key(&uid)
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn zone_of(&self, uid: CardUid) -> Option<Zone> {
        self.cards.get(&uid).map(CardInstance::zone)
    }

    /// All cards, in insertion order.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> + '_ {
        self.order.iter().filter_map(|uid| self.cards.get(uid))
    }

    /// Cards in one zone, in insertion order.
    ///
    /// The deck is listed in insertion order too; use `deck_order` for the
    /// stack order.
    pub fn cards_in_zone(&self, zone: Zone) -> impl Iterator<Item = &CardInstance> + '_ {
        self.cards().filter(move |c| c.zone() == zone)
    }

    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        if zone == Zone::Deck {
            self.deck.len()
        } else {
            self.cards_in_zone(zone).count()
        }
    }

    /// Deck uids, bottom first.
    #[must_use]
    pub fn deck_order(&self) -> &[CardUid] {
        &self.deck
    }

    /// Card that would be drawn next.
    #[must_use]
    pub fn top_of_deck(&self) -> Option<CardUid> {
        self.deck.last().copied()
    }

    /// Total number of cards tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    // === Movement ===

    /// Change a card's zone without any rules; keeps the deck stack in step.
    fn relocate(&mut self, uid: CardUid, to: Zone) -> Option<Zone> {
        let card = self.cards.get_mut(&uid)?;
        let from = card.zone();
        card.set_zone(to);

        if from == Zone::Deck {
            self.deck.retain(|&d| d != uid);
        }
        if to == Zone::Deck {
            self.deck.push(uid);
        }
        Some(from)
    }

    /// Move a card to another zone.
    ///
    /// Returns the zone the card left, or `None` if nothing happened: unknown
    /// uid, same zone, or a summoning-sick card sent to quest.
    ///
    /// On success the card is exerted if the target exerts on entry and
    /// readied otherwise. A move from hand onto the board gives the card
    /// summoning sickness; a move off the board clears it.
    ///
    /// A ready card already in `Quest` quests again: it is exerted in place
    /// and `Some(Zone::Quest)` is returned. An exerted one is refused.
    pub fn move_card(&mut self, uid: CardUid, to: Zone) -> Option<Zone> {
        let Some(card) = self.cards.get_mut(&uid) else {
            debug!("move of unknown {} ignored", uid);
            return None;
        };
        let from = card.zone();

        if to == Zone::Quest && card.is_summoning_sick() {
            debug!("{} is summoning sick, cannot enter quest", uid);
            return None;
        }
        if from == to {
            if to == Zone::Quest && !card.is_exerted() {
                card.set_exerted(true);
                return Some(from);
            }
            return None;
        }

        self.relocate(uid, to)?;
        if let Some(card) = self.cards.get_mut(&uid) {
            card.set_exerted(to.exerts_on_entry());
            if from == Zone::Hand && to.is_board() {
                card.set_new(true);
            } else if !to.is_board() {
                card.set_new(false);
            }
        }
        Some(from)
    }

    /// Move the top card of the deck into hand.
    ///
    /// Returns `None` on an empty deck; the caller decides what that means.
    pub fn draw(&mut self) -> Option<CardUid> {
        let uid = self.top_of_deck()?;
        self.relocate(uid, Zone::Hand)?;
        Some(uid)
    }

    /// Shuffle the deck. Nothing outside the deck order changes.
    pub fn shuffle_deck(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.deck);
    }

    // === Damage and readying ===

    /// Add damage to a card, banishing it to discard if lethal.
    ///
    /// Returns `None` for an unknown uid.
    pub fn apply_damage(&mut self, uid: CardUid, amount: u32) -> Option<DamageResult> {
        let card = self.cards.get_mut(&uid)?;
        let total = card.add_damage(amount);
        let banished = card.is_lethal() && card.zone() != Zone::Discard;

        if banished {
            self.banish(uid);
        }
        Some(DamageResult { total, banished })
    }

    /// Remove damage from a card, flooring at 0.
    pub fn heal(&mut self, uid: CardUid, amount: u32) -> Option<u32> {
        Some(self.cards.get_mut(&uid)?.remove_damage(amount))
    }

    fn banish(&mut self, uid: CardUid) {
        debug!("{} banished", uid);
        let _ = self.relocate(uid, Zone::Discard);
        if let Some(card) = self.cards.get_mut(&uid) {
            card.set_exerted(false);
            card.set_new(false);
        }
    }

    /// Flip a card's exerted flag. Returns the new value.
    pub fn toggle_exert(&mut self, uid: CardUid) -> Option<bool> {
        let card = self.cards.get_mut(&uid)?;
        let exerted = !card.is_exerted();
        card.set_exerted(exerted);
        Some(exerted)
    }

    /// Start-of-turn untap: ready every card and clear summoning sickness.
    ///
    /// Cards sitting in `Exerted` return to `Ready`; questing cards stay in
    /// `Quest` but are readied.
    pub fn untap_all(&mut self) {
        let exerted: Vec<CardUid> = self
            .cards_in_zone(Zone::Exerted)
            .map(CardInstance::uid)
            .collect();
        for uid in exerted {
            let _ = self.relocate(uid, Zone::Ready);
        }
        for card in self.cards.values_mut() {
            card.set_exerted(false);
            card.set_new(false);
        }
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.order.clear();
        self.deck.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Ability, CardId, CardTemplate};

    fn character(willpower: u32) -> CardTemplate {
        CardTemplate::new(CardId::new(1), "Test Character")
            .with_strength(2)
            .with_willpower(willpower)
            .with_lore(1)
    }

    fn manager_with(cards: &[(u64, Zone)]) -> ZoneManager {
        let template = character(3);
        let mut manager = ZoneManager::new();
        for &(uid, zone) in cards {
            manager.insert(
                CardInstance::from_template(CardUid(uid), &template, zone),
                ZonePosition::Top,
            );
        }
        manager
    }

    #[test]
    fn test_insert_and_lookup() {
        let manager = manager_with(&[(10, Zone::Hand), (11, Zone::Ready)]);

        assert_eq!(manager.zone_of(CardUid(10)), Some(Zone::Hand));
        assert_eq!(manager.zone_of(CardUid(11)), Some(Zone::Ready));
        assert_eq!(manager.zone_of(CardUid(99)), None);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_duplicate_uid_rejected() {
        let mut manager = manager_with(&[(10, Zone::Hand)]);
        let dup = CardInstance::from_template(CardUid(10), &character(1), Zone::Ready);

        assert!(!manager.insert(dup, ZonePosition::Top));
        assert_eq!(manager.zone_of(CardUid(10)), Some(Zone::Hand));
    }

    #[test]
    fn test_deck_positions() {
        let template = character(3);
        let mut manager = ZoneManager::new();
        let card = |uid| CardInstance::from_template(CardUid(uid), &template, Zone::Deck);

        manager.insert(card(10), ZonePosition::Top);
        manager.insert(card(11), ZonePosition::Bottom);
        manager.insert(card(12), ZonePosition::Top);
        manager.insert(card(13), ZonePosition::Index(1));

        assert_eq!(
            manager.deck_order(),
            &[CardUid(11), CardUid(13), CardUid(10), CardUid(12)]
        );
        assert_eq!(manager.top_of_deck(), Some(CardUid(12)));
    }

    #[test]
    fn test_draw_pops_top() {
        let mut manager = manager_with(&[(10, Zone::Deck), (11, Zone::Deck)]);

        assert_eq!(manager.draw(), Some(CardUid(11)));
        assert_eq!(manager.zone_of(CardUid(11)), Some(Zone::Hand));
        assert_eq!(manager.draw(), Some(CardUid(10)));
        assert_eq!(manager.draw(), None);
        assert_eq!(manager.zone_size(Zone::Hand), 2);
    }

    #[test]
    fn test_move_from_hand_sets_new() {
        let mut manager = manager_with(&[(10, Zone::Hand)]);

        assert_eq!(manager.move_card(CardUid(10), Zone::Ready), Some(Zone::Hand));
        let card = manager.get(CardUid(10)).unwrap();
        assert!(card.is_new());
        assert!(!card.is_exerted());
    }

    #[test]
    fn test_board_move_keeps_new() {
        let mut manager = manager_with(&[(10, Zone::Hand)]);
        manager.move_card(CardUid(10), Zone::Ready);
        manager.move_card(CardUid(10), Zone::Exerted);

        let card = manager.get(CardUid(10)).unwrap();
        assert!(card.is_new());
        assert!(card.is_exerted());
    }

    #[test]
    fn test_move_elsewhere_does_not_set_new() {
        let mut manager = manager_with(&[(10, Zone::Discard)]);

        manager.move_card(CardUid(10), Zone::Ready);
        assert!(!manager.get(CardUid(10)).unwrap().is_new());
    }

    #[test]
    fn test_quest_guard() {
        let mut manager = manager_with(&[(10, Zone::Hand)]);
        manager.move_card(CardUid(10), Zone::Ready);

        assert_eq!(manager.move_card(CardUid(10), Zone::Quest), None);
        assert_eq!(manager.zone_of(CardUid(10)), Some(Zone::Ready));
    }

    #[test]
    fn test_hand_to_quest_exerts_and_sets_new() {
        let mut manager = manager_with(&[(10, Zone::Hand)]);

        assert_eq!(manager.move_card(CardUid(10), Zone::Quest), Some(Zone::Hand));
        let card = manager.get(CardUid(10)).unwrap();
        assert!(card.is_exerted());
        assert!(card.is_new());
    }

    #[test]
    fn test_rush_may_quest() {
        let template = character(3).with_ability(Ability::Rush);
        let mut manager = ZoneManager::new();
        manager.insert(
            CardInstance::from_template(CardUid(1), &template, Zone::Hand),
            ZonePosition::Top,
        );
        manager.move_card(CardUid(1), Zone::Ready);

        assert_eq!(manager.move_card(CardUid(1), Zone::Quest), Some(Zone::Ready));
    }

    #[test]
    fn test_same_zone_and_unknown_are_noops() {
        let mut manager = manager_with(&[(10, Zone::Ready)]);

        assert_eq!(manager.move_card(CardUid(10), Zone::Ready), None);
        assert_eq!(manager.move_card(CardUid(99), Zone::Ready), None);
    }

    #[test]
    fn test_move_into_and_out_of_deck() {
        let mut manager = manager_with(&[(10, Zone::Deck), (11, Zone::Hand)]);

        manager.move_card(CardUid(11), Zone::Deck);
        assert_eq!(manager.top_of_deck(), Some(CardUid(11)));

        manager.move_card(CardUid(10), Zone::Discard);
        assert_eq!(manager.deck_order(), &[CardUid(11)]);
    }

    #[test]
    fn test_lethal_damage_banishes() {
        let mut manager = manager_with(&[(10, Zone::Exerted)]);

        let result = manager.apply_damage(CardUid(10), 2).unwrap();
        assert_eq!(result, DamageResult { total: 2, banished: false });

        let result = manager.apply_damage(CardUid(10), 1).unwrap();
        assert!(result.banished);

        let card = manager.get(CardUid(10)).unwrap();
        assert_eq!(card.zone(), Zone::Discard);
        assert!(!card.is_exerted());
    }

    #[test]
    fn test_heal_floors_at_zero() {
        let mut manager = manager_with(&[(10, Zone::Ready)]);

        assert_eq!(manager.heal(CardUid(10), 1), Some(0));
        manager.apply_damage(CardUid(10), 1);
        assert_eq!(manager.heal(CardUid(10), 3), Some(0));
        assert_eq!(manager.heal(CardUid(99), 1), None);
    }

    #[test]
    fn test_untap_all() {
        let mut manager = manager_with(&[(10, Zone::Hand), (11, Zone::Ready)]);
        manager.move_card(CardUid(10), Zone::Exerted);
        manager.move_card(CardUid(11), Zone::Quest);

        manager.untap_all();

        let a = manager.get(CardUid(10)).unwrap();
        assert_eq!(a.zone(), Zone::Ready);
        assert!(!a.is_exerted());
        assert!(!a.is_new());

        let b = manager.get(CardUid(11)).unwrap();
        assert_eq!(b.zone(), Zone::Quest);
        assert!(!b.is_exerted());
    }

    #[test]
    fn test_ready_card_quests_again_in_place() {
        let mut manager = manager_with(&[(10, Zone::Ready)]);
        manager.move_card(CardUid(10), Zone::Quest);
        assert_eq!(manager.move_card(CardUid(10), Zone::Quest), None);

        manager.untap_all();
        assert_eq!(manager.move_card(CardUid(10), Zone::Quest), Some(Zone::Quest));
        assert!(manager.get(CardUid(10)).unwrap().is_exerted());
        assert_eq!(manager.zone_size(Zone::Quest), 1);
    }

    #[test]
    fn test_shuffle_only_touches_deck() {
        let mut manager = ZoneManager::new();
        let template = character(3);
        for i in 0..20 {
            manager.insert(
                CardInstance::from_template(CardUid(i), &template, Zone::Deck),
                ZonePosition::Top,
            );
        }
        manager.insert(
            CardInstance::from_template(CardUid(100), &template, Zone::Hand),
            ZonePosition::Top,
        );

        let before = manager.deck_order().to_vec();
        let mut rng = GameRng::new(42);
        manager.shuffle_deck(&mut rng);
        let after = manager.deck_order().to_vec();

        assert_ne!(before, after);
        let mut sorted = after.clone();
        sorted.sort();
        assert_eq!(sorted, before);
        assert_eq!(manager.zone_of(CardUid(100)), Some(Zone::Hand));
    }

    #[test]
    fn test_clear() {
        let mut manager = manager_with(&[(10, Zone::Deck), (11, Zone::Hand)]);
        manager.clear();

        assert!(manager.is_empty());
        assert!(manager.deck_order().is_empty());
    }
}
