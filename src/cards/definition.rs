//! Card templates - static card data.
//!
//! `CardTemplate` holds the printed properties of a card: stats, keyword
//! abilities, type. Instance-specific data (zone, damage, exertion) lives in
//! `CardInstance`, which copies the template's stats by value.

use serde::{Deserialize, Serialize};

use super::abilities::{Ability, AbilitySet};

/// Unique identifier for a card template.
///
/// This identifies the printed card, not a specific copy in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Template id carried by masked placeholders.
    pub const HIDDEN: CardId = CardId(u32::MAX);

    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Printed card type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Character,
    Action,
    Item,
    Location,
    Song,
}

/// Printed numeric stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardStats {
    pub strength: u32,
    pub willpower: u32,
    /// Lore gained per quest.
    pub lore_value: u32,
    pub cost: u32,
    /// May be put into the inkwell.
    pub inkable: bool,
}

impl CardStats {
    /// Character stats: strength, willpower, lore.
    #[must_use]
    pub const fn character(strength: u32, willpower: u32, lore_value: u32) -> Self {
        Self {
            strength,
            willpower,
            lore_value,
            cost: 0,
            inkable: false,
        }
    }
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use lore_table::cards::{Ability, CardId, CardTemplate};
///
/// let beast = CardTemplate::new(CardId::new(1), "Beast - Hardheaded")
///     .with_cost(3)
///     .with_strength(4)
///     .with_willpower(3)
///     .with_ability(Ability::Challenger(2));
///
/// assert_eq!(beast.stats.strength, 4);
/// assert_eq!(beast.abilities.challenger(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub card_id: CardId,
    pub name: String,
    pub card_type: CardType,
    pub stats: CardStats,
    pub abilities: AbilitySet,
    /// Rules text as printed.
    #[serde(default)]
    pub body_text: String,
    /// Ink colour.
    #[serde(default)]
    pub color: String,
}

impl CardTemplate {
    /// Create a character template with zeroed stats.
    #[must_use]
    pub fn new(card_id: CardId, name: impl Into<String>) -> Self {
        Self {
            card_id,
            name: name.into(),
            card_type: CardType::Character,
            stats: CardStats::default(),
            abilities: AbilitySet::new(),
            body_text: String::new(),
            color: String::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.card_type = card_type;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: CardStats) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_strength(mut self, strength: u32) -> Self {
        self.stats.strength = strength;
        self
    }

    #[must_use]
    pub fn with_willpower(mut self, willpower: u32) -> Self {
        self.stats.willpower = willpower;
        self
    }

    #[must_use]
    pub fn with_lore(mut self, lore_value: u32) -> Self {
        self.stats.lore_value = lore_value;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.stats.cost = cost;
        self
    }

    #[must_use]
    pub fn inkable(mut self) -> Self {
        self.stats.inkable = true;
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.insert(ability);
        self
    }

    /// Set rules text and pick up any keywords it prints.
    #[must_use]
    pub fn with_body_text(mut self, text: impl Into<String>) -> Self {
        self.body_text = text.into();
        for ability in AbilitySet::parse_keywords(&self.body_text).iter() {
            self.abilities.insert(*ability);
        }
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}
