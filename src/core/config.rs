//! Table configuration types.
//!
//! - `Zone`: The eight named zones a card copy can occupy
//! - `ZoneVisibility`: What remote mirrors may see of a zone
//! - `GameMode`: Room game mode (free-for-all or teams)
//! - `TableConfig`: Per-session knobs (win threshold, seat limit, seed)

use serde::{Deserialize, Serialize};

/// Zone visibility rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneVisibility {
    /// All cards visible to all players (board, inkwell, discard).
    Public,
    /// Cards visible only to the zone owner (hand).
    OwnerOnly,
    /// Cards not visible to anyone (face-down deck).
    Hidden,
}

/// Named location a card copy occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Hand,
    Inkwell,
    Discard,
    Deck,
    Items,
    Ready,
    Exerted,
    Quest,
}

impl Zone {
    /// Every zone, in display order.
    pub const ALL: [Zone; 8] = [
        Zone::Deck,
        Zone::Hand,
        Zone::Inkwell,
        Zone::Ready,
        Zone::Exerted,
        Zone::Quest,
        Zone::Items,
        Zone::Discard,
    ];

    /// Zones that make up the battlefield.
    ///
    /// Moving a card from `Hand` into one of these gives it summoning
    /// sickness.
    #[must_use]
    pub const fn is_board(self) -> bool {
        matches!(self, Zone::Items | Zone::Ready | Zone::Exerted | Zone::Quest)
    }

    /// Visibility of the zone's contents to other players.
    #[must_use]
    pub const fn visibility(self) -> ZoneVisibility {
        match self {
            Zone::Hand => ZoneVisibility::OwnerOnly,
            Zone::Deck => ZoneVisibility::Hidden,
            _ => ZoneVisibility::Public,
        }
    }

    /// True if mirrors only ever see a card back for this zone.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        !matches!(self.visibility(), ZoneVisibility::Public)
    }

    /// True if a card entering this zone is exerted.
    #[must_use]
    pub const fn exerts_on_entry(self) -> bool {
        matches!(self, Zone::Exerted | Zone::Quest)
    }

    /// Wire/display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Hand => "hand",
            Zone::Inkwell => "inkwell",
            Zone::Discard => "discard",
            Zone::Deck => "deck",
            Zone::Items => "items",
            Zone::Ready => "ready",
            Zone::Exerted => "exerted",
            Zone::Quest => "quest",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Room game mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    #[serde(rename = "1v1")]
    OneVsOne,
    #[serde(rename = "1v1v1")]
    ThreeWay,
    #[serde(rename = "1v1v1v1")]
    FourWay,
    #[serde(rename = "2v2")]
    TwoVsTwo,
}

impl GameMode {
    /// Seats the mode is played with.
    #[must_use]
    pub const fn player_count(self) -> usize {
        match self {
            GameMode::OneVsOne => 2,
            GameMode::ThreeWay => 3,
            GameMode::FourWay | GameMode::TwoVsTwo => 4,
        }
    }

    /// True if lore is shared between teammates.
    #[must_use]
    pub const fn is_team(self) -> bool {
        matches!(self, GameMode::TwoVsTwo)
    }

    /// Wire/display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameMode::OneVsOne => "1v1",
            GameMode::ThreeWay => "1v1v1",
            GameMode::FourWay => "1v1v1v1",
            GameMode::TwoVsTwo => "2v2",
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-session configuration.
///
/// ```
/// use lore_table::core::TableConfig;
///
/// let config = TableConfig::new()
///     .with_seed(7)
///     .with_opening_hand(7);
///
/// assert_eq!(config.win_lore, 20);
/// assert_eq!(config.opening_hand, 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Lore at which a player (or team) wins.
    pub win_lore: u32,

    /// Seat limit per room.
    pub max_players: usize,

    /// Cards drawn right after a deck is generated.
    pub opening_hand: usize,

    /// Seed for shuffles, uids and guest names.
    pub seed: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            win_lore: 20,
            max_players: 4,
            opening_hand: 0,
            seed: 0,
        }
    }
}

impl TableConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the win threshold.
    #[must_use]
    pub fn with_win_lore(mut self, lore: u32) -> Self {
        self.win_lore = lore;
        self
    }

    /// Set the seat limit.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        assert!(max > 0, "Must allow at least 1 player");
        self.max_players = max;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
