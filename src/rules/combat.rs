//! Challenge (combat) resolution.
//!
//! A challenge is a two-step interaction: the player arms an attacker, then
//! picks a defender from an opponent's mirror. Resolution is split into pure
//! pieces so each can be checked on its own:
//!
//! 1. `check_legality`: gates, in order, each aborting with no effect
//! 2. `challenge_damage`: damage each side deals after modifiers
//!
//! Applying damage to the local attacker and emitting the defender's damage
//! is the session's job; the resolver never touches a remote mirror.
//!
//! ## Damage
//!
//! ```text
//! to_defender = max(0, attacker.strength + attacker.challenger - defender.resist)
//! to_attacker = max(0, defender.strength - attacker.resist)
//! ```
//!
//! Challenger only boosts outgoing damage.
//!
//! ```
//! use lore_table::cards::{Ability, CardId, CardInstance, CardTemplate};
//! use lore_table::core::{CardUid, Zone};
//! use lore_table::rules::combat::challenge_damage;
//!
//! let attacker = CardTemplate::new(CardId::new(1), "A")
//!     .with_strength(3)
//!     .with_willpower(4)
//!     .with_ability(Ability::Challenger(2));
//! let defender = CardTemplate::new(CardId::new(2), "D")
//!     .with_strength(2)
//!     .with_willpower(5)
//!     .with_ability(Ability::Resist(1));
//!
//! let damage = challenge_damage(
//!     &CardInstance::from_template(CardUid(1), &attacker, Zone::Ready),
//!     &CardInstance::from_template(CardUid(2), &defender, Zone::Exerted),
//! );
//! assert_eq!(damage.to_defender, 4);
//! assert_eq!(damage.to_attacker, 2);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardInstance;
use crate::core::entity::CardUid;
use crate::core::player::PeerId;

/// Challenge intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeState {
    #[default]
    Idle,
    /// An attacker has been picked; waiting for a defender.
    Armed(CardUid),
}

impl ChallengeState {
    /// The armed attacker, if any.
    #[must_use]
    pub fn attacker(self) -> Option<CardUid> {
        match self {
            ChallengeState::Idle => None,
            ChallengeState::Armed(uid) => Some(uid),
        }
    }

    #[must_use]
    pub fn is_armed(self) -> bool {
        matches!(self, ChallengeState::Armed(_))
    }
}

/// Damage exchanged by a challenge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDamage {
    pub to_defender: u32,
    pub to_attacker: u32,
}

/// Why a challenge was refused. Every refusal leaves both cards untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ChallengeRejection {
    #[error("no attacker is armed")]
    NotArmed,
    #[error("attacker {0} is not on the board")]
    MissingAttacker(CardUid),
    #[error("defender {0} is not in any mirror")]
    MissingDefender(CardUid),
    #[error("{0} is not in play")]
    NotInPlay(CardUid),
    #[error("attacker {0} is summoning sick")]
    SummoningSick(CardUid),
    #[error("only evasive characters can challenge an evasive character")]
    Evasive,
    #[error("bodyguard {0} must be challenged first")]
    Bodyguard(CardUid),
}

/// Summary of a resolved challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeReport {
    pub attacker: CardUid,
    pub defender: CardUid,
    /// Player whose mirror holds the defender.
    pub defender_owner: PeerId,
    pub damage: ChallengeDamage,
    /// The attacker took lethal damage and went to discard.
    pub attacker_banished: bool,
}

/// Whether a card may be armed as an attacker.
pub fn check_attacker(attacker: &CardInstance) -> Result<(), ChallengeRejection> {
    if !attacker.zone().is_board() {
        return Err(ChallengeRejection::NotInPlay(attacker.uid()));
    }
    if attacker.is_summoning_sick() {
        return Err(ChallengeRejection::SummoningSick(attacker.uid()));
    }
    Ok(())
}

/// Legality gates for attacking `defender`, checked in order.
///
/// The defender must be on the board; hidden and off-board cards are never
/// targets. `defending_side` is every card of the defender's owner. Only
/// exerted bodyguards on the board force a target; any one of them may be
/// chosen.
pub fn check_legality<'a>(
    attacker: &CardInstance,
    defender: &CardInstance,
    defending_side: impl IntoIterator<Item = &'a CardInstance>,
) -> Result<(), ChallengeRejection> {
    if !defender.zone().is_board() {
        return Err(ChallengeRejection::NotInPlay(defender.uid()));
    }
    if defender.abilities.has_evasive() && !attacker.abilities.has_evasive() {
        return Err(ChallengeRejection::Evasive);
    }

    if is_guarding(defender) {
        return Ok(());
    }
    let guard = defending_side
        .into_iter()
        .find(|c| c.uid() != defender.uid() && is_guarding(c));
    if let Some(guard) = guard {
        return Err(ChallengeRejection::Bodyguard(guard.uid()));
    }

    Ok(())
}

fn is_guarding(card: &CardInstance) -> bool {
    card.zone().is_board() && card.is_exerted() && card.abilities.has_bodyguard()
}

/// Damage each side deals.
#[must_use]
pub fn challenge_damage(attacker: &CardInstance, defender: &CardInstance) -> ChallengeDamage {
    let attacker_power = attacker.stats.strength + attacker.abilities.challenger();
    let defender_power = defender.stats.strength;

    ChallengeDamage {
        to_defender: attacker_power.saturating_sub(defender.abilities.resist()),
        to_attacker: defender_power.saturating_sub(attacker.abilities.resist()),
    }
}
