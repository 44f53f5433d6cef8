//! Challenge (combat) integration tests.
//!
//! A table joins a two-player room, receives the opponent's board as a
//! snapshot and challenges cards in that mirror.

use lore_table::cards::{Ability, CardId, CardInstance, CardTemplate};
use lore_table::core::{CardUid, GameMode, PeerId, Player, RoomId, Table, TableConfig, Zone};
use lore_table::relay::Room;
use lore_table::rules::combat::{self, ChallengeDamage};
use lore_table::rules::{ChallengeRejection, ChallengeState};
use lore_table::sync::{Inbound, Outbound, Snapshot};

const ROOM: RoomId = RoomId(1234);
const ME: PeerId = PeerId(1);
const THEM: PeerId = PeerId(2);

fn fighter(strength: u32, willpower: u32) -> CardTemplate {
    CardTemplate::new(CardId::new(10), "Fighter")
        .with_strength(strength)
        .with_willpower(willpower)
}

fn seated_table() -> Table {
    let mut table = Table::new(TableConfig::new().with_seed(8));
    table.handle(Inbound::Connected { peer: ME });
    table.handle(Inbound::RoomJoined(Room {
        id: ROOM,
        players: vec![Player::new(ME, "me"), Player::new(THEM, "them")],
        max_players: 4,
        game_mode: GameMode::OneVsOne,
    }));
    table.drain_outbox();
    table
}

fn opponent_board(table: &mut Table, cards: Vec<CardInstance>) {
    table.handle(Inbound::OpponentCards {
        player: THEM,
        snapshot: Snapshot { cards },
    });
}

fn challenge_results(table: &mut Table) -> Vec<(CardUid, u32)> {
    table
        .drain_outbox()
        .into_iter()
        .filter_map(|m| match m {
            Outbound::ChallengeResult { defender_uid, amount, .. } => Some((defender_uid, amount)),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Arming
// =============================================================================

/// A character that just arrived from hand cannot be armed.
#[test]
fn test_arm_rejects_summoning_sick() {
    let mut table = seated_table();
    let uid = table.spawn_card(&fighter(2, 2), Zone::Hand);
    table.move_card(uid, Zone::Ready);

    assert!(!table.arm_challenge(uid));
    assert_eq!(table.challenge(), ChallengeState::Idle);
}

/// Rush characters may challenge the turn they arrive.
#[test]
fn test_arm_allows_rush() {
    let mut table = seated_table();
    let uid = table.spawn_card(&fighter(2, 2).with_ability(Ability::Rush), Zone::Hand);
    table.move_card(uid, Zone::Ready);

    assert!(table.arm_challenge(uid));
    assert_eq!(table.challenge(), ChallengeState::Armed(uid));
    assert!(table.cancel_challenge());
    assert!(!table.cancel_challenge());
}

/// Resolving without an armed attacker is rejected.
#[test]
fn test_resolve_without_arming() {
    let mut table = seated_table();
    assert_eq!(
        table.resolve_challenge(CardUid(5)),
        Err(ChallengeRejection::NotArmed)
    );
}

// =============================================================================
// Damage
// =============================================================================

/// Challenger adds to the attacker's strength and Resist soaks damage.
#[test]
fn test_damage_with_modifiers() {
    let attacker = CardInstance::from_template(
        CardUid(1),
        &fighter(3, 5).with_ability(Ability::Challenger(2)),
        Zone::Ready,
    );
    let defender = CardInstance::from_template(
        CardUid(2),
        &fighter(2, 5).with_ability(Ability::Resist(1)),
        Zone::Exerted,
    );

    assert_eq!(
        combat::challenge_damage(&attacker, &defender),
        ChallengeDamage { to_defender: 4, to_attacker: 2 }
    );
}

/// A legal challenge exerts the attacker, damages it and sends the
/// defender's damage to the room.
#[test]
fn test_successful_challenge() {
    let mut table = seated_table();
    let attacker = table.spawn_card(&fighter(3, 4), Zone::Ready);
    let defender = CardInstance::from_template(CardUid(900), &fighter(1, 2), Zone::Exerted);
    opponent_board(&mut table, vec![defender]);
    table.drain_outbox();

    assert!(table.arm_challenge(attacker));
    let report = table.resolve_challenge(CardUid(900)).unwrap();

    assert_eq!(report.defender_owner, THEM);
    assert_eq!(report.damage, ChallengeDamage { to_defender: 3, to_attacker: 1 });
    assert!(!report.attacker_banished);
    assert_eq!(table.challenge(), ChallengeState::Idle);

    let card = table.board().zones.get(attacker).unwrap();
    assert_eq!(card.zone(), Zone::Exerted);
    assert!(card.is_exerted());
    assert_eq!(card.damage(), 1);

    assert_eq!(challenge_results(&mut table), vec![(CardUid(900), 3)]);

    // The mirror waits for its owner's next snapshot.
    let mirrored = table.mirrors().get(THEM).unwrap().get(CardUid(900)).unwrap();
    assert_eq!(mirrored.damage(), 0);
}

/// Counter damage can banish the attacker.
#[test]
fn test_attacker_banished_by_counter() {
    let mut table = seated_table();
    let attacker = table.spawn_card(&fighter(1, 2), Zone::Ready);
    opponent_board(
        &mut table,
        vec![CardInstance::from_template(CardUid(900), &fighter(5, 9), Zone::Ready)],
    );

    table.arm_challenge(attacker);
    let report = table.resolve_challenge(CardUid(900)).unwrap();

    assert!(report.attacker_banished);
    assert_eq!(table.board().zones.zone_of(attacker), Some(Zone::Discard));
}

// =============================================================================
// Legality gates
// =============================================================================

/// Evasive defenders turn away non-evasive attackers without side effects.
#[test]
fn test_evasive_blocks_plain_attacker() {
    let mut table = seated_table();
    let attacker = table.spawn_card(&fighter(3, 3), Zone::Ready);
    let defender = CardInstance::from_template(
        CardUid(900),
        &fighter(1, 1).with_ability(Ability::Evasive),
        Zone::Ready,
    );
    opponent_board(&mut table, vec![defender]);
    table.drain_outbox();

    table.arm_challenge(attacker);
    assert_eq!(
        table.resolve_challenge(CardUid(900)),
        Err(ChallengeRejection::Evasive)
    );

    assert_eq!(table.challenge(), ChallengeState::Idle);
    let card = table.board().zones.get(attacker).unwrap();
    assert_eq!(card.zone(), Zone::Ready);
    assert_eq!(card.damage(), 0);
    assert!(table.drain_outbox().is_empty());
}

/// An evasive attacker may challenge an evasive defender.
#[test]
fn test_evasive_meets_evasive() {
    let mut table = seated_table();
    let attacker = table.spawn_card(&fighter(3, 3).with_ability(Ability::Evasive), Zone::Ready);
    let defender = CardInstance::from_template(
        CardUid(900),
        &fighter(1, 1).with_ability(Ability::Evasive),
        Zone::Ready,
    );
    opponent_board(&mut table, vec![defender]);

    table.arm_challenge(attacker);
    assert!(table.resolve_challenge(CardUid(900)).is_ok());
}

/// An exerted bodyguard must be challenged first.
#[test]
fn test_bodyguard_redirects() {
    let mut table = seated_table();
    let attacker = table.spawn_card(&fighter(3, 3), Zone::Ready);
    let guard = CardInstance::from_template(
        CardUid(901),
        &fighter(1, 4).with_ability(Ability::Bodyguard),
        Zone::Exerted,
    );
    let target = CardInstance::from_template(CardUid(902), &fighter(1, 1), Zone::Exerted);
    opponent_board(&mut table, vec![guard, target]);
    table.drain_outbox();

    table.arm_challenge(attacker);
    assert_eq!(
        table.resolve_challenge(CardUid(902)),
        Err(ChallengeRejection::Bodyguard(CardUid(901)))
    );
    assert_eq!(table.board().zones.get(attacker).unwrap().damage(), 0);
    assert!(challenge_results(&mut table).is_empty());

    table.arm_challenge(attacker);
    assert!(table.resolve_challenge(CardUid(901)).is_ok());
    assert_eq!(challenge_results(&mut table), vec![(CardUid(901), 3)]);
}

/// A ready bodyguard does not protect anyone.
#[test]
fn test_ready_bodyguard_ignored() {
    let mut table = seated_table();
    let attacker = table.spawn_card(&fighter(3, 3), Zone::Ready);
    let guard = CardInstance::from_template(
        CardUid(901),
        &fighter(1, 4).with_ability(Ability::Bodyguard),
        Zone::Ready,
    );
    let target = CardInstance::from_template(CardUid(902), &fighter(1, 1), Zone::Exerted);
    opponent_board(&mut table, vec![guard, target]);

    table.arm_challenge(attacker);
    assert!(table.resolve_challenge(CardUid(902)).is_ok());
}

/// A masked card from an opponent's hand cannot be challenged.
#[test]
fn test_hidden_card_is_not_a_defender() {
    let mut table = seated_table();
    let attacker = table.spawn_card(&fighter(3, 3), Zone::Ready);
    let in_hand = CardInstance::from_template(CardUid(903), &fighter(1, 1), Zone::Hand);
    opponent_board(&mut table, vec![in_hand.masked()]);
    table.drain_outbox();

    assert!(table.arm_challenge(attacker));
    assert_eq!(
        table.resolve_challenge(CardUid(903)),
        Err(ChallengeRejection::NotInPlay(CardUid(903)))
    );
    assert_eq!(table.board().zones.zone_of(attacker), Some(Zone::Ready));
    assert!(challenge_results(&mut table).is_empty());
}

/// Cards outside play cannot be armed, so a banished card stays in discard.
#[test]
fn test_attacker_must_be_in_play() {
    let mut table = seated_table();
    let banished = table.spawn_card(&fighter(3, 3), Zone::Discard);
    let in_hand = table.spawn_card(&fighter(3, 3), Zone::Hand);
    opponent_board(
        &mut table,
        vec![CardInstance::from_template(CardUid(900), &fighter(1, 1), Zone::Exerted)],
    );

    assert!(!table.arm_challenge(banished));
    assert!(!table.arm_challenge(in_hand));
    assert_eq!(table.challenge(), ChallengeState::Idle);
    assert_eq!(table.board().zones.zone_of(banished), Some(Zone::Discard));
}

/// Defenders must be in a mirror, not on our own board.
#[test]
fn test_own_card_is_not_a_defender() {
    let mut table = seated_table();
    let attacker = table.spawn_card(&fighter(3, 3), Zone::Ready);
    let own = table.spawn_card(&fighter(1, 1), Zone::Ready);

    table.arm_challenge(attacker);
    assert_eq!(
        table.resolve_challenge(own),
        Err(ChallengeRejection::MissingDefender(own))
    );
}

// =============================================================================
// Inbound damage
// =============================================================================

/// Damage from another player's challenge follows the local banish rule.
#[test]
fn test_inbound_damage_banishes() {
    let mut table = seated_table();
    let uid = table.spawn_card(&fighter(1, 3), Zone::Exerted);
    table.drain_outbox();

    table.handle(Inbound::ChallengeDamage { defender_uid: uid, amount: 2 });
    assert_eq!(table.board().zones.get(uid).unwrap().damage(), 2);

    table.handle(Inbound::ChallengeDamage { defender_uid: uid, amount: 1 });
    assert_eq!(table.board().zones.zone_of(uid), Some(Zone::Discard));

    let synced = table
        .drain_outbox()
        .iter()
        .filter(|m| matches!(m, Outbound::UpdateCards { .. }))
        .count();
    assert_eq!(synced, 2);
}

/// Damage aimed at one of our cards that is not in play changes nothing.
#[test]
fn test_inbound_damage_to_hand_ignored() {
    let mut table = seated_table();
    let uid = table.spawn_card(&fighter(1, 1), Zone::Hand);
    table.drain_outbox();

    table.handle(Inbound::ChallengeDamage { defender_uid: uid, amount: 5 });

    let card = table.board().zones.get(uid).unwrap();
    assert_eq!(card.zone(), Zone::Hand);
    assert_eq!(card.damage(), 0);
    assert!(table.drain_outbox().is_empty());
}

/// Damage addressed to a uid we do not own is ignored.
#[test]
fn test_inbound_damage_for_other_board() {
    let mut table = seated_table();
    table.spawn_card(&fighter(1, 3), Zone::Ready);
    table.drain_outbox();

    table.handle(Inbound::ChallengeDamage { defender_uid: CardUid(31337), amount: 9 });

    assert!(table.drain_outbox().is_empty());
    assert!(table.board().zones.cards().all(|c| c.damage() == 0));
}
