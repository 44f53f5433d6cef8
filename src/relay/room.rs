//! Rooms and the room registry.
//!
//! The relay owns rooms. A room is a four-digit code, a roster of up to
//! `max_players` players and a game mode. The registry keeps the roster's
//! lore totals using the same delta rule as the clients; it never looks at
//! card state.

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::GameMode;
use crate::core::entity::RoomId;
use crate::core::player::{PeerId, Player, Team};
use crate::core::rng::GameRng;
use crate::rules::ledger::apply_lore_delta;

/// Default seat limit for new rooms.
pub const DEFAULT_MAX_PLAYERS: usize = 4;

/// Errors from room operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),
    #[error("Room is full: {0}")]
    RoomFull(RoomId),
    #[error("{0} is not in a room")]
    NotInRoom(PeerId),
}

/// A room as the relay reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    /// Roster in join order; this is also the seat order.
    pub players: Vec<Player>,
    pub max_players: usize,
    pub game_mode: GameMode,
}

impl Room {
    #[must_use]
    pub fn new(id: RoomId, max_players: usize) -> Self {
        Self {
            id,
            players: Vec::new(),
            max_players,
            game_mode: GameMode::default(),
        }
    }

    #[must_use]
    pub fn player(&self, peer: PeerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == peer)
    }

    #[must_use]
    pub fn contains(&self, peer: PeerId) -> bool {
        self.player(peer).is_some()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    /// Peer ids in seat order.
    #[must_use]
    pub fn seats(&self) -> Vec<PeerId> {
        self.players.iter().map(|p| p.id).collect()
    }
}

/// All live rooms.
#[derive(Clone, Debug)]
pub struct RoomRegistry {
    rooms: FxHashMap<RoomId, Room>,
    max_players: usize,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PLAYERS)
    }
}

impl RoomRegistry {
    #[must_use]
    pub fn new(max_players: usize) -> Self {
        Self {
            rooms: FxHashMap::default(),
            max_players,
        }
    }

    /// Open an empty room with a fresh four-digit code.
    pub fn create_room(&mut self, rng: &mut GameRng) -> RoomId {
        let id = loop {
            let id = RoomId::new(rng.gen_range_u16(RoomId::MIN..=RoomId::MAX));
            if !self.rooms.contains_key(&id) {
                break id;
            }
        };
        self.rooms.insert(id, Room::new(id, self.max_players));
        info!("room {} created", id);
        id
    }

    /// Seat a player. Joining a room one is already in is a no-op.
    pub fn join_room(&mut self, id: RoomId, peer: PeerId, name: &str) -> Result<&Room, RelayError> {
        let room = self.rooms.get_mut(&id).ok_or(RelayError::RoomNotFound(id))?;

        if !room.contains(peer) {
            if room.is_full() {
                return Err(RelayError::RoomFull(id));
            }
            room.players.push(Player::new(peer, name));
            info!("{} joined room {}", peer, id);
        }
        Ok(&*room)
    }

    /// Remove a player from whichever room holds them.
    ///
    /// Empty rooms are deleted. Returns the room id and the remaining roster.
    pub fn leave_room(&mut self, peer: PeerId) -> Option<(RoomId, Vec<Player>)> {
        let id = self.room_of(peer)?;
        let room = self.rooms.get_mut(&id)?;
        room.players.retain(|p| p.id != peer);
        info!("{} left room {}", peer, id);

        let remaining = room.players.clone();
        if remaining.is_empty() {
            self.rooms.remove(&id);
            info!("room {} closed", id);
        }
        Some((id, remaining))
    }

    /// Apply a lore delta from a player.
    ///
    /// In team modes every teammate moves by the same delta.
    pub fn update_lore(
        &mut self,
        id: RoomId,
        peer: PeerId,
        delta: i32,
    ) -> Result<&Room, RelayError> {
        let room = self.seated_room(id, peer)?;
        let team_play = room.game_mode.is_team();
        apply_lore_delta(&mut room.players, peer, delta, team_play);
        Ok(&*room)
    }

    pub fn set_game_mode(
        &mut self,
        id: RoomId,
        peer: PeerId,
        mode: GameMode,
    ) -> Result<&Room, RelayError> {
        let room = self.seated_room(id, peer)?;
        room.game_mode = mode;
        Ok(&*room)
    }

    pub fn set_team(&mut self, id: RoomId, peer: PeerId, team: Team) -> Result<&Room, RelayError> {
        let room = self.seated_room(id, peer)?;
        if let Some(player) = room.players.iter_mut().find(|p| p.id == peer) {
            player.team = Some(team);
        }
        Ok(&*room)
    }

    fn seated_room(&mut self, id: RoomId, peer: PeerId) -> Result<&mut Room, RelayError> {
        let room = self.rooms.get_mut(&id).ok_or(RelayError::RoomNotFound(id))?;
        if !room.contains(peer) {
            return Err(RelayError::NotInRoom(peer));
        }
        Ok(room)
    }

    #[must_use]
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Room a peer is seated in.
    #[must_use]
    pub fn room_of(&self, peer: PeerId) -> Option<RoomId> {
        self.rooms
            .values()
            .find(|room| room.contains(peer))
            .map(|room| room.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
