//! Keyword abilities.
//!
//! Abilities are a closed set of variants with typed payloads, so every
//! modifier lookup the challenge resolver does is checked at compile time.
//!
//! ## Numeric abilities
//!
//! - `Resist(n)`: damage dealt to this card is reduced by `n`
//! - `Challenger(n)`: +`n` strength while challenging (outgoing only)
//! - `Shift(n)`: may be played onto a same-named character for `n` ink
//! - `Singer(n)`: counts as cost `n` for singing songs
//!
//! Absent numeric abilities read as 0.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// A keyword ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    /// May challenge the turn it is played.
    Rush,
    /// Can only be challenged by evasive characters.
    Evasive,
    /// Cannot be chosen by opponents' effects.
    Ward,
    /// While exerted, must be chosen as the challenge target.
    Bodyguard,
    /// Cannot quest.
    Reckless,
    /// Lends strength to another character when questing.
    Support,
    Resist(u32),
    Challenger(u32),
    Shift(u32),
    Singer(u32),
}

impl Ability {
    /// Keyword as printed on cards.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Ability::Rush => "Rush",
            Ability::Evasive => "Evasive",
            Ability::Ward => "Ward",
            Ability::Bodyguard => "Bodyguard",
            Ability::Reckless => "Reckless",
            Ability::Support => "Support",
            Ability::Resist(_) => "Resist",
            Ability::Challenger(_) => "Challenger",
            Ability::Shift(_) => "Shift",
            Ability::Singer(_) => "Singer",
        }
    }

    fn same_kind(self, other: Ability) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ability::Resist(n) | Ability::Challenger(n) => write!(f, "{} +{}", self.keyword(), n),
            Ability::Shift(n) | Ability::Singer(n) => write!(f, "{} {}", self.keyword(), n),
            _ => f.write_str(self.keyword()),
        }
    }
}

/// Failure to read a keyword.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseAbilityError {
    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),
    #[error("keyword {0} needs a numeric value")]
    MissingValue(&'static str),
}

impl std::str::FromStr for Ability {
    type Err = ParseAbilityError;

    /// Parse printed keywords such as `Evasive`, `Resist +2` or `Shift 5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let keyword = parts.next().unwrap_or_default();
        let value = parts
            .next()
            .and_then(|v| v.trim_start_matches('+').parse::<u32>().ok());

        let numeric = |name: &'static str, build: fn(u32) -> Ability| {
            value.map(build).ok_or(ParseAbilityError::MissingValue(name))
        };

        match keyword.to_ascii_lowercase().as_str() {
            "rush" => Ok(Ability::Rush),
            "evasive" => Ok(Ability::Evasive),
            "ward" => Ok(Ability::Ward),
            "bodyguard" => Ok(Ability::Bodyguard),
            "reckless" => Ok(Ability::Reckless),
            "support" => Ok(Ability::Support),
            "resist" => numeric("Resist", Ability::Resist),
            "challenger" => numeric("Challenger", Ability::Challenger),
            "shift" => numeric("Shift", Ability::Shift),
            "singer" => numeric("Singer", Ability::Singer),
            _ => Err(ParseAbilityError::UnknownKeyword(s.trim().to_string())),
        }
    }
}

/// The abilities of one card.
///
/// Holds at most one ability of each kind; adding a second `Resist` replaces
/// the first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilitySet(SmallVec<[Ability; 4]>);

impl AbilitySet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every recognised keyword out of free text.
    ///
    /// Keywords are separated by commas, periods or newlines. Unrecognised
    /// fragments are skipped, so rules text can be passed in as-is.
    #[must_use]
    pub fn parse_keywords(text: &str) -> Self {
        text.split([',', '.', '\n'])
            .filter_map(|fragment| fragment.trim().parse::<Ability>().ok())
            .collect()
    }

    /// Add an ability (builder pattern).
    #[must_use]
    pub fn with(mut self, ability: Ability) -> Self {
        self.insert(ability);
        self
    }

    /// Add an ability, replacing any ability of the same kind.
    pub fn insert(&mut self, ability: Ability) {
        match self.0.iter_mut().find(|a| a.same_kind(ability)) {
            Some(existing) => *existing = ability,
            None => self.0.push(ability),
        }
    }

    /// Check for an exact ability.
    #[must_use]
    pub fn contains(&self, ability: Ability) -> bool {
        self.0.contains(&ability)
    }

    #[must_use]
    pub fn has_rush(&self) -> bool {
        self.contains(Ability::Rush)
    }

    #[must_use]
    pub fn has_evasive(&self) -> bool {
        self.contains(Ability::Evasive)
    }

    #[must_use]
    pub fn has_bodyguard(&self) -> bool {
        self.contains(Ability::Bodyguard)
    }

    #[must_use]
    pub fn has_ward(&self) -> bool {
        self.contains(Ability::Ward)
    }

    #[must_use]
    pub fn has_reckless(&self) -> bool {
        self.contains(Ability::Reckless)
    }

    #[must_use]
    pub fn has_support(&self) -> bool {
        self.contains(Ability::Support)
    }

    /// Resist value, 0 if absent.
    #[must_use]
    pub fn resist(&self) -> u32 {
        self.0
            .iter()
            .find_map(|a| match a {
                Ability::Resist(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Challenger bonus, 0 if absent.
    #[must_use]
    pub fn challenger(&self) -> u32 {
        self.0
            .iter()
            .find_map(|a| match a {
                Ability::Challenger(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(0)
    }

    /// Shift cost, if the card has shift.
    #[must_use]
    pub fn shift(&self) -> Option<u32> {
        self.0.iter().find_map(|a| match a {
            Ability::Shift(n) => Some(*n),
            _ => None,
        })
    }

    /// Singer value, if the card has singer.
    #[must_use]
    pub fn singer(&self) -> Option<u32> {
        self.0.iter().find_map(|a| match a {
            Ability::Singer(n) => Some(*n),
            _ => None,
        })
    }

    /// Iterate over the abilities.
    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Ability> for AbilitySet {
    fn from_iter<I: IntoIterator<Item = Ability>>(iter: I) -> Self {
        let mut set = Self::new();
        for ability in iter {
            set.insert(ability);
        }
        set
    }
}
