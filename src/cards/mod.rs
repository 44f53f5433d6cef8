//! Card system: templates, abilities, instances, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a printed card
//! - `CardTemplate`: Static card data (stats, type, abilities)
//! - `Ability` / `AbilitySet`: Closed set of keyword abilities
//! - `CardInstance`: One physical copy (zone, damage, exertion)
//! - `CardRegistry` / `DeckList`: Template lookup and deck contents

pub mod abilities;
pub mod definition;
pub mod instance;
pub mod registry;

pub use abilities::{Ability, AbilitySet, ParseAbilityError};
pub use definition::{CardId, CardStats, CardTemplate, CardType};
pub use instance::CardInstance;
pub use registry::{CardRegistry, DeckEntry, DeckList};
