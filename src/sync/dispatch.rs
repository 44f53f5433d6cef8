//! Inbound message handling.
//!
//! One `match` over `Inbound` feeds every relay event into the session.
//! Handlers run to completion and may queue outbound messages (a fresh
//! snapshot after taking challenge damage, a join after creating a room).

use log::{debug, info, trace, warn};

use super::codec::{self, WireError};
use super::message::{Inbound, Outbound};
use crate::core::entity::CardUid;
use crate::core::player::{PeerId, Player};
use crate::core::state::Table;
use crate::relay::Room;

impl Table {
    /// Handle one message from the relay.
    pub fn handle(&mut self, message: Inbound) {
        match message {
            Inbound::Connected { peer } => {
                info!("connected as {}", peer);
                self.peer = Some(peer);
                self.connected = true;
            }
            Inbound::Disconnected => {
                info!("disconnected");
                self.connected = false;
                self.reset_room();
            }
            Inbound::RoomCreated(room_id) => {
                let name = self.player_name.clone();
                self.join_room(room_id, name);
            }
            Inbound::RoomJoined(room) => {
                info!("joined room {}", room.id);
                self.room = Some(room.id);
                self.join_error = None;
                self.adopt_room(room);
                self.sync_board();
            }
            Inbound::JoinRejected(reason) => {
                debug!("join rejected: {}", reason);
                self.join_error = Some(reason);
            }
            Inbound::PlayerJoined(players) => {
                self.adopt_roster(players);
                self.sync_board();
            }
            Inbound::PlayerLeft(players) => self.adopt_roster(players),
            Inbound::RoomUpdated(room) => {
                if self.room == Some(room.id) {
                    self.adopt_room(room);
                } else {
                    warn!("update for room {} we are not in", room.id);
                }
            }
            Inbound::OpponentCards { player, snapshot } => {
                if player == self.me() {
                    trace!("own snapshot echoed back, ignored");
                } else {
                    self.mirrors.replace(player, snapshot);
                }
            }
            Inbound::TurnEnded { from } => {
                let me = self.me();
                self.turn.receive_turn_end(from, me);
            }
            Inbound::ChallengeDamage { defender_uid, amount } => {
                self.take_challenge_damage(defender_uid, amount);
            }
        }
    }

    /// Decode and handle one frame.
    ///
    /// Undecodable frames are logged and dropped; state is untouched.
    pub fn handle_frame(&mut self, frame: &[u8]) -> Result<(), WireError> {
        match codec::decode::<Inbound>(frame) {
            Ok(message) => {
                self.handle(message);
                Ok(())
            }
            Err(err) => {
                warn!("dropping bad frame ({} bytes): {}", frame.len(), err);
                Err(err)
            }
        }
    }

    /// Drain the outbox as encoded frames.
    pub fn drain_frames(&mut self) -> Result<Vec<Vec<u8>>, WireError> {
        self.drain_outbox()
            .iter()
            .map(codec::encode::<Outbound>)
            .collect()
    }

    /// Apply damage dealt to one of our cards by someone else's challenge.
    ///
    /// Uses the same banish rule as local damage. Damage for a uid we do not
    /// own was aimed at another player and is ignored, as is damage to one
    /// of our cards that is not in play.
    fn take_challenge_damage(&mut self, uid: CardUid, amount: u32) {
        let Some(card) = self.board.zones.get(uid) else {
            trace!("challenge damage for {} is not ours", uid);
            return;
        };
        if !card.zone().is_board() {
            warn!("challenge damage for {} in {} ignored", uid, card.zone());
            return;
        }
        let Some(result) = self.board.zones.apply_damage(uid, amount) else {
            return;
        };
        if result.banished {
            info!("{} banished by challenge", uid);
            self.disarm_if(uid);
        }
        self.sync_board();
    }

    fn adopt_room(&mut self, room: Room) {
        self.game_mode = room.game_mode;
        self.adopt_roster(room.players);
        self.check_win();
    }

    /// Take the relay's roster as truth and drop mirrors of departed players.
    fn adopt_roster(&mut self, players: Vec<Player>) {
        self.ledger
            .replace_from_roster(&players, self.game_mode.is_team());
        self.turn
            .set_seats(players.iter().map(|p| p.id).collect::<Vec<PeerId>>());
        self.mirrors
            .retain(|peer| players.iter().any(|p| p.id == peer));
        self.roster = players;
    }
}
