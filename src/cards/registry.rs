//! Card registry and deck lists.
//!
//! The `CardRegistry` stores every known card template and provides lookup by
//! `CardId`. A `DeckList` names how many copies of each template a deck holds;
//! the session turns it into card instances.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardId, CardTemplate, CardType};

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use lore_table::cards::{CardId, CardRegistry, CardTemplate};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::new(CardId::new(1), "Stitch - Rock Star").with_lore(2));
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.stats.lore_value, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardTemplate>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, returning the one it replaced.
    pub fn register(&mut self, card: CardTemplate) -> Option<CardTemplate> {
        self.cards.insert(card.card_id, card)
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardTemplate> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &CardTemplate> {
        self.cards.values()
    }

    /// Find templates by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &CardTemplate> {
        self.cards.values().filter(move |c| c.card_type == card_type)
    }

    /// Find templates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardTemplate>
    where
        F: Fn(&CardTemplate) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

impl FromIterator<CardTemplate> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = CardTemplate>>(iter: I) -> Self {
        let mut registry = Self::new();
        for card in iter {
            registry.register(card);
        }
        registry
    }
}

/// One line of a deck list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card_id: CardId,
    pub count: u32,
}

/// Copies-per-template deck description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add copies of a card (builder pattern).
    #[must_use]
    pub fn with(mut self, card_id: CardId, count: u32) -> Self {
        self.add(card_id, count);
        self
    }

    /// Add copies, merging with an existing entry for the same card.
    pub fn add(&mut self, card_id: CardId, count: u32) {
        match self.entries.iter_mut().find(|e| e.card_id == card_id) {
            Some(entry) => entry.count += count,
            None => self.entries.push(DeckEntry { card_id, count }),
        }
    }

    /// Total copies across all entries.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }
}
