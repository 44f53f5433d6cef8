//! Local commands.
//!
//! Every user action is a method on `Table`; `Command` names the same set as
//! data so a presentation layer can queue, log or replay them and feed them
//! through `Table::apply`.
//!
//! Illegal commands are silent no-ops: the method returns `false` (or
//! `None`), logs the reason at debug level and leaves state untouched.
//! Every applied command that changes the local board queues a masked
//! snapshot for the room.
//!
//! ## Example
//!
//! ```
//! use lore_table::cards::{CardId, CardTemplate};
//! use lore_table::core::{Command, Table, Zone};
//!
//! let mut table = Table::default();
//! let template = CardTemplate::new(CardId::new(1), "Mickey Mouse").with_willpower(3).with_lore(2);
//! let uid = table.spawn_card(&template, Zone::Hand);
//!
//! assert!(table.apply(Command::Move { uid, to: Zone::Ready }));
//! assert!(table.board().zones.get(uid).unwrap().is_new());
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::config::{GameMode, Zone};
use super::entity::{CardUid, RoomId};
use super::player::Team;
use super::state::Table;
use crate::cards::{CardInstance, CardRegistry, CardTemplate, DeckList};
use crate::rules::combat::{self, ChallengeRejection, ChallengeReport, ChallengeState};
use crate::rules::Outcome;
use crate::sync::Outbound;
use crate::zones::ZonePosition;

/// A user command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    SetPlayerName(String),
    CreateRoom,
    JoinRoom { room_id: RoomId, player_name: String },
    LeaveRoom,
    SetGameMode(GameMode),
    AssignTeam(Team),
    UpdateLore(i32),
    Move { uid: CardUid, to: Zone },
    ToggleExert(CardUid),
    AddDamage(CardUid),
    RemoveDamage(CardUid),
    Draw,
    Shuffle,
    EndTurn,
    Ink(CardUid),
    Quest(CardUid),
    ArmChallenge(CardUid),
    CancelChallenge,
    ResolveChallenge(CardUid),
    DismissGameOver,
}

impl Table {
    /// Run a command. Returns true if it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::SetPlayerName(name) => {
                self.set_player_name(name);
                true
            }
            Command::CreateRoom => {
                self.create_room();
                true
            }
            Command::JoinRoom { room_id, player_name } => {
                self.join_room(room_id, player_name);
                true
            }
            Command::LeaveRoom => self.leave_room(),
            Command::SetGameMode(mode) => self.set_game_mode(mode),
            Command::AssignTeam(team) => self.assign_team(team),
            Command::UpdateLore(delta) => self.update_lore(delta),
            Command::Move { uid, to } => self.move_card(uid, to),
            Command::ToggleExert(uid) => self.toggle_exert(uid),
            Command::AddDamage(uid) => self.add_damage(uid),
            Command::RemoveDamage(uid) => self.remove_damage(uid),
            Command::Draw => self.draw().is_some(),
            Command::Shuffle => {
                self.shuffle_deck();
                true
            }
            Command::EndTurn => self.end_turn(),
            Command::Ink(uid) => self.ink(uid),
            Command::Quest(uid) => self.quest(uid),
            Command::ArmChallenge(uid) => self.arm_challenge(uid),
            Command::CancelChallenge => self.cancel_challenge(),
            Command::ResolveChallenge(uid) => self.resolve_challenge(uid).is_ok(),
            Command::DismissGameOver => {
                self.dismiss_game_over();
                true
            }
        }
    }

    // === Room ===

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Ask the relay for a new room. We join it once it exists.
    pub fn create_room(&mut self) {
        self.outbox.push_back(Outbound::CreateRoom);
    }

    /// Ask to join a room. An empty name becomes `Guest_<n>`.
    pub fn join_room(&mut self, room_id: RoomId, player_name: impl Into<String>) {
        let mut name = player_name.into();
        if name.is_empty() {
            name = self.player_name.clone();
        }
        if name.is_empty() {
            name = format!("Guest_{}", self.rng.gen_range(0..1000));
        }
        self.player_name = name.clone();
        self.join_error = None;
        self.outbox.push_back(Outbound::JoinRoom {
            room_id,
            player_name: name,
        });
    }

    /// Leave the current room and forget everything about it.
    pub fn leave_room(&mut self) -> bool {
        if !self.emit_to_room(|room_id| Outbound::LeaveRoom { room_id }) {
            debug!("not in a room, nothing to leave");
            return false;
        }
        self.reset_room();
        true
    }

    pub fn set_game_mode(&mut self, mode: GameMode) -> bool {
        if !self.emit_to_room(|room_id| Outbound::SetGameMode { room_id, mode }) {
            debug!("game mode needs a room");
            return false;
        }
        self.game_mode = mode;
        true
    }

    pub fn assign_team(&mut self, team: Team) -> bool {
        let sent = self.emit_to_room(|room_id| Outbound::AssignTeam { room_id, team });
        if !sent {
            debug!("team assignment needs a room");
        }
        sent
    }

    /// Send a signed lore delta. Totals change when the relay answers.
    pub fn update_lore(&mut self, delta: i32) -> bool {
        let sent = self.emit_to_room(|room_id| Outbound::UpdateLore { room_id, delta });
        if !sent {
            debug!("lore delta {} needs a room", delta);
        }
        sent
    }

    // === Board setup ===

    /// Put a fresh copy of a template into a zone.
    pub fn spawn_card(&mut self, template: &CardTemplate, zone: Zone) -> CardUid {
        let uid = self.fresh_uid();
        let card = CardInstance::from_template(uid, template, zone);
        self.board.zones.insert(card, ZonePosition::Top);
        self.sync_board();
        uid
    }

    /// Replace the board with a freshly shuffled deck.
    ///
    /// Unknown card ids are skipped. Draws `opening_hand` cards afterwards;
    /// a short deck simply stops drawing. Returns the number of cards made.
    pub fn spawn_deck(&mut self, registry: &CardRegistry, deck: &DeckList) -> usize {
        self.board.clear();
        self.challenge = ChallengeState::Idle;

        let mut spawned = 0;
        for entry in &deck.entries {
            let Some(template) = registry.get(entry.card_id) else {
                debug!("{} is not registered, skipped", entry.card_id);
                continue;
            };
            for _ in 0..entry.count {
                let uid = self.fresh_uid();
                let card = CardInstance::from_template(uid, template, Zone::Deck);
                self.board.zones.insert(card, ZonePosition::Top);
                spawned += 1;
            }
        }

        self.board.zones.shuffle_deck(&mut self.rng);
        for _ in 0..self.config.opening_hand {
            if self.board.zones.draw().is_none() {
                break;
            }
        }
        self.sync_board();
        spawned
    }

    // === Zone commands ===

    /// Move a card. Entering quest sends the card's lore.
    pub fn move_card(&mut self, uid: CardUid, to: Zone) -> bool {
        if self.board.zones.move_card(uid, to).is_none() {
            return false;
        }
        self.sync_board();

        if to == Zone::Quest {
            let lore = self.board.zones.get(uid).map_or(0, |c| c.stats.lore_value);
            if lore > 0 {
                let delta = i32::try_from(lore).unwrap_or(i32::MAX);
                self.emit_to_room(|room_id| Outbound::UpdateLore { room_id, delta });
            }
        }
        true
    }

    /// Quest with a character: same as moving it into quest.
    pub fn quest(&mut self, uid: CardUid) -> bool {
        self.move_card(uid, Zone::Quest)
    }

    pub fn toggle_exert(&mut self, uid: CardUid) -> bool {
        if self.board.zones.toggle_exert(uid).is_none() {
            debug!("exert of unknown {} ignored", uid);
            return false;
        }
        self.sync_board();
        true
    }

    /// One point of damage, banishing on lethal.
    pub fn add_damage(&mut self, uid: CardUid) -> bool {
        let Some(result) = self.board.zones.apply_damage(uid, 1) else {
            debug!("damage to unknown {} ignored", uid);
            return false;
        };
        if result.banished {
            self.disarm_if(uid);
        }
        self.sync_board();
        true
    }

    /// Remove one point of damage.
    pub fn remove_damage(&mut self, uid: CardUid) -> bool {
        if self.board.zones.heal(uid, 1).is_none() {
            debug!("heal of unknown {} ignored", uid);
            return false;
        }
        self.sync_board();
        true
    }

    /// Draw the top card. An empty deck loses the game.
    pub fn draw(&mut self) -> Option<CardUid> {
        match self.board.zones.draw() {
            Some(uid) => {
                self.sync_board();
                Some(uid)
            }
            None => {
                self.terminal.latch(Outcome::Loss);
                None
            }
        }
    }

    pub fn shuffle_deck(&mut self) {
        self.board.zones.shuffle_deck(&mut self.rng);
        self.sync_board();
    }

    /// Put a card from hand into the inkwell, once per turn.
    pub fn ink(&mut self, uid: CardUid) -> bool {
        if !self.board.ink(uid) {
            return false;
        }
        self.sync_board();
        true
    }

    // === Turn ===

    /// End our turn: untap, draw, reset ink, hand over.
    ///
    /// Only legal on our own turn. Decking out ends the game instead of
    /// handing over.
    pub fn end_turn(&mut self) -> bool {
        if !self.turn.is_my_turn() {
            debug!("end turn outside our turn ignored");
            return false;
        }

        self.board.zones.untap_all();
        if self.board.zones.draw().is_none() {
            self.terminal.latch(Outcome::Loss);
            self.sync_board();
            return true;
        }

        self.board.reset_ink();
        let me = self.me();
        self.turn.finish_my_turn(me);
        self.sync_board();
        self.emit_to_room(|room_id| Outbound::EndTurn { room_id });
        true
    }

    // === Challenge ===

    /// Pick an attacker. Summoning-sick characters cannot challenge.
    pub fn arm_challenge(&mut self, uid: CardUid) -> bool {
        let Some(card) = self.board.zones.get(uid) else {
            debug!("cannot arm unknown {}", uid);
            return false;
        };
        if let Err(reason) = combat::check_attacker(card) {
            debug!("challenge not armed: {}", reason);
            return false;
        }
        self.challenge = ChallengeState::Armed(uid);
        true
    }

    /// Drop the armed attacker. Returns false if nothing was armed.
    pub fn cancel_challenge(&mut self) -> bool {
        let was_armed = self.challenge.is_armed();
        self.challenge = ChallengeState::Idle;
        was_armed
    }

    /// Challenge a card in an opponent's mirror with the armed attacker.
    ///
    /// Always returns to `Idle`. On success the attacker takes its damage
    /// locally and the defender's damage is sent to the room; the mirror is
    /// left alone until its owner syncs.
    pub fn resolve_challenge(
        &mut self,
        defender_uid: CardUid,
    ) -> Result<ChallengeReport, ChallengeRejection> {
        let attacker_uid = self.challenge.attacker().ok_or(ChallengeRejection::NotArmed);
        self.challenge = ChallengeState::Idle;
        let attacker_uid = attacker_uid?;

        let result = self.try_challenge(attacker_uid, defender_uid);
        if let Err(reason) = &result {
            debug!("challenge rejected: {}", reason);
        }
        result
    }

    fn try_challenge(
        &mut self,
        attacker_uid: CardUid,
        defender_uid: CardUid,
    ) -> Result<ChallengeReport, ChallengeRejection> {
        let attacker = self
            .board
            .zones
            .get(attacker_uid)
            .ok_or(ChallengeRejection::MissingAttacker(attacker_uid))?;
        let (defender_owner, defender) = self
            .mirrors
            .find_card(defender_uid)
            .ok_or(ChallengeRejection::MissingDefender(defender_uid))?;

        combat::check_attacker(attacker)?;
        let side = self
            .mirrors
            .get(defender_owner)
            .map(|mirror| mirror.cards().iter().collect::<Vec<_>>())
            .unwrap_or_default();
        combat::check_legality(attacker, defender, side)?;
        let damage = combat::challenge_damage(attacker, defender);

        self.board.zones.move_card(attacker_uid, Zone::Exerted);
        if let Some(card) = self.board.zones.get_mut(attacker_uid) {
            card.set_exerted(true);
        }
        let attacker_banished = self
            .board
            .zones
            .apply_damage(attacker_uid, damage.to_attacker)
            .is_some_and(|r| r.banished);

        self.sync_board();
        self.emit_to_room(|room_id| Outbound::ChallengeResult {
            room_id,
            defender_uid,
            amount: damage.to_defender,
        });

        Ok(ChallengeReport {
            attacker: attacker_uid,
            defender: defender_uid,
            defender_owner,
            damage,
            attacker_banished,
        })
    }

    /// Return to `Idle` if `uid` is the armed attacker.
    pub(crate) fn disarm_if(&mut self, uid: CardUid) {
        if self.challenge == ChallengeState::Armed(uid) {
            self.challenge = ChallengeState::Idle;
        }
    }

    // === Game over ===

    /// Hide the game-over outcome. It never fires again.
    pub fn dismiss_game_over(&mut self) {
        self.terminal.dismiss();
    }

    /// Forget the room: roster, mirrors, lore and seat order.
    pub(crate) fn reset_room(&mut self) {
        self.room = None;
        self.roster.clear();
        self.ledger.clear();
        self.mirrors.clear();
        self.turn.set_seats(Vec::new());
        self.challenge = ChallengeState::Idle;
    }
}
