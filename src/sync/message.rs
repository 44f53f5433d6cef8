//! Messages exchanged with the relay.
//!
//! `Inbound` is everything the relay delivers to a client; `Outbound` is
//! everything a client asks the relay to do. Both are plain tagged unions so
//! the session can handle them in one `match` and tests can build them
//! directly.

use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;
use crate::core::config::GameMode;
use crate::core::entity::{CardUid, RoomId};
use crate::core::player::{PeerId, Player, Team};
use crate::relay::Room;

/// Relay to client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inbound {
    /// Transport is up; `peer` is our id.
    Connected { peer: PeerId },
    /// Transport dropped.
    Disconnected,
    /// A room we asked for exists and is empty.
    RoomCreated(RoomId),
    RoomJoined(Room),
    JoinRejected(String),
    /// Roster after someone joined.
    PlayerJoined(Vec<Player>),
    /// Roster after someone left.
    PlayerLeft(Vec<Player>),
    /// Lore, mode or team changed.
    RoomUpdated(Room),
    /// A remote board snapshot.
    OpponentCards { player: PeerId, snapshot: Snapshot },
    TurnEnded { from: PeerId },
    /// Damage dealt to one of our cards by a challenge.
    ChallengeDamage { defender_uid: CardUid, amount: u32 },
}

/// Client to relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outbound {
    CreateRoom,
    JoinRoom { room_id: RoomId, player_name: String },
    LeaveRoom { room_id: RoomId },
    UpdateLore { room_id: RoomId, delta: i32 },
    SetGameMode { room_id: RoomId, mode: GameMode },
    AssignTeam { room_id: RoomId, team: Team },
    UpdateCards { room_id: RoomId, snapshot: Snapshot },
    EndTurn { room_id: RoomId },
    ChallengeResult { room_id: RoomId, defender_uid: CardUid, amount: u32 },
}

impl Outbound {
    /// Room the message is addressed to, if any.
    #[must_use]
    pub fn room_id(&self) -> Option<RoomId> {
        match self {
            Outbound::CreateRoom => None,
            Outbound::JoinRoom { room_id, .. }
            | Outbound::LeaveRoom { room_id }
            | Outbound::UpdateLore { room_id, .. }
            | Outbound::SetGameMode { room_id, .. }
            | Outbound::AssignTeam { room_id, .. }
            | Outbound::UpdateCards { room_id, .. }
            | Outbound::EndTurn { room_id }
            | Outbound::ChallengeResult { room_id, .. } => Some(*room_id),
        }
    }
}
