//! In-process relay hub.
//!
//! `LocalRelay` plays the server's part for tests and single-process play:
//! it hands out peer ids, keeps one inbox per peer and routes each
//! `Outbound` message to the right inboxes. It knows rooms and rosters but
//! nothing about cards; snapshots pass through untouched.
//!
//! ## Routing
//!
//! | Message                               | Delivered to                        |
//! |---------------------------------------|-------------------------------------|
//! | `CreateRoom`                          | sender (`RoomCreated`)              |
//! | `JoinRoom`                            | sender (`RoomJoined`/`JoinRejected`)|
//! |                                       | others (`PlayerJoined`)             |
//! | `LeaveRoom`, disconnect               | others (`PlayerLeft`)               |
//! | `UpdateLore`, `SetGameMode`, `AssignTeam` | everyone (`RoomUpdated`)        |
//! | `UpdateCards`, `EndTurn`, `ChallengeResult` | everyone but the sender       |

use std::collections::VecDeque;

use log::{debug, warn};
use rustc_hash::FxHashMap;

use super::room::{RelayError, Room, RoomRegistry};
use crate::core::entity::RoomId;
use crate::core::player::{PeerId, Player};
use crate::core::rng::GameRng;
use crate::sync::codec::{self, WireError};
use crate::sync::{Inbound, Outbound};

/// Reference relay connecting peers inside one process.
#[derive(Clone, Debug)]
pub struct LocalRelay {
    rooms: RoomRegistry,
    inboxes: FxHashMap<PeerId, VecDeque<Inbound>>,
    next_peer: u32,
    rng: GameRng,
}

impl Default for LocalRelay {
    fn default() -> Self {
        Self::new(0)
    }
}

impl LocalRelay {
    /// Create a relay; `seed` drives room codes.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rooms: RoomRegistry::default(),
            inboxes: FxHashMap::default(),
            next_peer: 1,
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Open a connection. The new peer's inbox starts with `Connected`.
    pub fn connect(&mut self) -> PeerId {
        let peer = PeerId::new(self.next_peer);
        self.next_peer += 1;
        self.inboxes
            .insert(peer, VecDeque::from([Inbound::Connected { peer }]));
        peer
    }

    /// Close a connection, leaving any room and dropping the inbox.
    pub fn disconnect(&mut self, peer: PeerId) {
        self.leave(peer);
        self.inboxes.remove(&peer);
    }

    /// Take everything queued for a peer.
    pub fn drain(&mut self, peer: PeerId) -> Vec<Inbound> {
        self.inboxes
            .get_mut(&peer)
            .map(|inbox| inbox.drain(..).collect())
            .unwrap_or_default()
    }

    /// Take everything queued for a peer as encoded frames.
    pub fn drain_frames(&mut self, peer: PeerId) -> Result<Vec<Vec<u8>>, WireError> {
        self.drain(peer).iter().map(codec::encode::<Inbound>).collect()
    }

    /// Decode and route one frame from a peer.
    ///
    /// Room errors are logged and swallowed, as the sender has already been
    /// told where it matters (`JoinRejected`).
    pub fn submit_frame(&mut self, from: PeerId, frame: &[u8]) -> Result<(), WireError> {
        let message = codec::decode::<Outbound>(frame).map_err(|err| {
            warn!("dropping bad frame from {}: {}", from, err);
            err
        })?;
        if let Err(err) = self.submit(from, message) {
            warn!("{} -> {}", from, err);
        }
        Ok(())
    }

    /// Route one message from a peer.
    pub fn submit(&mut self, from: PeerId, message: Outbound) -> Result<(), RelayError> {
        match message {
            Outbound::CreateRoom => {
                let id = self.rooms.create_room(&mut self.rng);
                self.deliver(from, Inbound::RoomCreated(id));
            }
            Outbound::JoinRoom { room_id, player_name } => {
                self.join(from, room_id, &player_name)?;
            }
            Outbound::LeaveRoom { room_id } => {
                self.require_member(room_id, from)?;
                self.leave(from);
            }
            Outbound::UpdateLore { room_id, delta } => {
                let room = self.rooms.update_lore(room_id, from, delta)?.clone();
                self.broadcast_room(room);
            }
            Outbound::SetGameMode { room_id, mode } => {
                let room = self.rooms.set_game_mode(room_id, from, mode)?.clone();
                self.broadcast_room(room);
            }
            Outbound::AssignTeam { room_id, team } => {
                let room = self.rooms.set_team(room_id, from, team)?.clone();
                self.broadcast_room(room);
            }
            Outbound::UpdateCards { room_id, snapshot } => {
                self.require_member(room_id, from)?;
                let message = Inbound::OpponentCards { player: from, snapshot };
                self.deliver_others(room_id, from, &message);
            }
            Outbound::EndTurn { room_id } => {
                self.require_member(room_id, from)?;
                self.deliver_others(room_id, from, &Inbound::TurnEnded { from });
            }
            Outbound::ChallengeResult { room_id, defender_uid, amount } => {
                self.require_member(room_id, from)?;
                let message = Inbound::ChallengeDamage { defender_uid, amount };
                self.deliver_others(room_id, from, &message);
            }
        }
        Ok(())
    }

    fn join(&mut self, from: PeerId, room_id: RoomId, name: &str) -> Result<(), RelayError> {
        if self.rooms.room_of(from).is_some_and(|current| current != room_id) {
            self.leave(from);
        }

        match self.rooms.join_room(room_id, from, name) {
            Ok(room) => {
                let room = room.clone();
                self.deliver_others(room_id, from, &Inbound::PlayerJoined(room.players.clone()));
                self.deliver(from, Inbound::RoomJoined(room));
                Ok(())
            }
            Err(err) => {
                self.deliver(from, Inbound::JoinRejected(err.to_string()));
                Err(err)
            }
        }
    }

    fn leave(&mut self, peer: PeerId) {
        if let Some((room_id, remaining)) = self.rooms.leave_room(peer) {
            self.deliver_to(&remaining, &Inbound::PlayerLeft(remaining.clone()));
            debug!("{} left {}, {} remain", peer, room_id, remaining.len());
        }
    }

    fn require_member(&self, room_id: RoomId, peer: PeerId) -> Result<(), RelayError> {
        let room = self.rooms.get(room_id).ok_or(RelayError::RoomNotFound(room_id))?;
        if room.contains(peer) {
            Ok(())
        } else {
            Err(RelayError::NotInRoom(peer))
        }
    }

    fn broadcast_room(&mut self, room: Room) {
        let players = room.players.clone();
        self.deliver_to(&players, &Inbound::RoomUpdated(room));
    }

    fn deliver_others(&mut self, room_id: RoomId, from: PeerId, message: &Inbound) {
        let others: Vec<Player> = self
            .rooms
            .get(room_id)
            .map(|room| room.players.iter().filter(|p| p.id != from).cloned().collect())
            .unwrap_or_default();
        self.deliver_to(&others, message);
    }

    fn deliver_to(&mut self, players: &[Player], message: &Inbound) {
        for player in players {
            self.deliver(player.id, message.clone());
        }
    }

    fn deliver(&mut self, peer: PeerId, message: Inbound) {
        match self.inboxes.get_mut(&peer) {
            Some(inbox) => inbox.push_back(message),
            None => debug!("{} has no inbox, message dropped", peer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameMode;
    use crate::core::entity::CardUid;
    use crate::sync::Snapshot;

    fn relay_with_room() -> (LocalRelay, RoomId, PeerId, PeerId) {
        let mut relay = LocalRelay::new(5);
        let a = relay.connect();
        let b = relay.connect();
        relay.submit(a, Outbound::CreateRoom).unwrap();
        let room_id = match relay.drain(a).last() {
            Some(Inbound::RoomCreated(id)) => *id,
            other => panic!("expected RoomCreated, got {:?}", other),
        };
        for (peer, name) in [(a, "A"), (b, "B")] {
            relay
                .submit(peer, Outbound::JoinRoom { room_id, player_name: name.to_string() })
                .unwrap();
        }
        relay.drain(a);
        relay.drain(b);
        (relay, room_id, a, b)
    }

    #[test]
    fn test_connect_assigns_ids() {
        let mut relay = LocalRelay::default();
        let a = relay.connect();
        let b = relay.connect();

        assert_eq!(a, PeerId(1));
        assert_eq!(b, PeerId(2));
        assert_eq!(relay.drain(a), vec![Inbound::Connected { peer: a }]);
    }

    #[test]
    fn test_join_notifies_others() {
        let mut relay = LocalRelay::new(1);
        let a = relay.connect();
        let b = relay.connect();
        relay.drain(a);
        relay.submit(a, Outbound::CreateRoom).unwrap();
        let room_id = match relay.drain(a).as_slice() {
            [Inbound::RoomCreated(id)] => *id,
            other => panic!("expected RoomCreated, got {:?}", other),
        };
        assert!(relay.rooms().room_of(a).is_none());

        relay
            .submit(a, Outbound::JoinRoom { room_id, player_name: "A".into() })
            .unwrap();
        relay.drain(a);
        relay
            .submit(b, Outbound::JoinRoom { room_id, player_name: "B".into() })
            .unwrap();

        assert!(matches!(
            relay.drain(a).as_slice(),
            [Inbound::PlayerJoined(players)] if players.len() == 2
        ));
        assert!(matches!(
            relay.drain(b).last(),
            Some(Inbound::RoomJoined(room)) if room.players.len() == 2
        ));
    }

    #[test]
    fn test_join_rejected() {
        let mut relay = LocalRelay::default();
        let a = relay.connect();
        relay.drain(a);

        let err = relay
            .submit(a, Outbound::JoinRoom { room_id: RoomId(1000), player_name: "A".into() })
            .unwrap_err();

        assert_eq!(err, RelayError::RoomNotFound(RoomId(1000)));
        assert_eq!(
            relay.drain(a),
            vec![Inbound::JoinRejected("Room not found: 1000".to_string())]
        );
    }

    #[test]
    fn test_snapshots_skip_sender() {
        let (mut relay, room_id, a, b) = relay_with_room();
        relay
            .submit(a, Outbound::UpdateCards { room_id, snapshot: Snapshot::default() })
            .unwrap();

        assert!(relay.drain(a).is_empty());
        assert_eq!(
            relay.drain(b),
            vec![Inbound::OpponentCards { player: a, snapshot: Snapshot::default() }]
        );
    }

    #[test]
    fn test_room_updates_reach_everyone() {
        let (mut relay, room_id, a, b) = relay_with_room();
        relay
            .submit(b, Outbound::SetGameMode { room_id, mode: GameMode::TwoVsTwo })
            .unwrap();

        for peer in [a, b] {
            assert!(matches!(
                relay.drain(peer).as_slice(),
                [Inbound::RoomUpdated(room)] if room.game_mode == GameMode::TwoVsTwo
            ));
        }
    }

    #[test]
    fn test_turn_and_damage_routing() {
        let (mut relay, room_id, a, b) = relay_with_room();
        relay.submit(a, Outbound::EndTurn { room_id }).unwrap();
        relay
            .submit(a, Outbound::ChallengeResult { room_id, defender_uid: CardUid(3), amount: 2 })
            .unwrap();

        assert!(relay.drain(a).is_empty());
        assert_eq!(
            relay.drain(b),
            vec![
                Inbound::TurnEnded { from: a },
                Inbound::ChallengeDamage { defender_uid: CardUid(3), amount: 2 },
            ]
        );
    }

    #[test]
    fn test_outsider_cannot_post() {
        let (mut relay, room_id, _, b) = relay_with_room();
        let c = relay.connect();

        assert_eq!(
            relay.submit(c, Outbound::EndTurn { room_id }),
            Err(RelayError::NotInRoom(c))
        );
        assert!(relay.drain(b).is_empty());
    }

    #[test]
    fn test_disconnect_notifies_and_closes() {
        let (mut relay, room_id, a, b) = relay_with_room();
        relay.disconnect(a);

        assert_eq!(
            relay.drain(b),
            vec![Inbound::PlayerLeft(vec![Player::new(b, "B")])]
        );
        relay.disconnect(b);
        assert!(relay.rooms().get(room_id).is_none());
    }

    #[test]
    fn test_bad_frame() {
        let mut relay = LocalRelay::default();
        let a = relay.connect();
        assert!(relay.submit_frame(a, &[9, 9]).is_err());
    }
}
