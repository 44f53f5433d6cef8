//! Turn/phase state machine.
//!
//! Each client tracks only whether it is its own turn. The hand-over
//! happens when a peer broadcasts the end of its turn.
//!
//! ## Rotation
//!
//! The room's seat order (roster order) decides who plays next: a turn-end
//! from seat `i` passes the turn to seat `i + 1` (wrapping). Only that client
//! moves to `MyTurn`. Without a known seat order, or when the sender is not
//! seated, any peer's turn-end hands the turn to us, which is exactly right
//! for two players.
//!
//! ```
//! use lore_table::core::PeerId;
//! use lore_table::rules::{TurnPhase, TurnState};
//!
//! let me = PeerId(2);
//! let mut turn = TurnState::new();
//! turn.set_seats(vec![PeerId(1), PeerId(2), PeerId(3)]);
//! assert!(turn.finish_my_turn(me));
//! assert_eq!(turn.phase(), TurnPhase::OpponentTurn);
//!
//! // Seat 3 ending its turn passes to seat 1, not to us.
//! assert!(!turn.receive_turn_end(PeerId(3), me));
//! assert!(turn.receive_turn_end(PeerId(1), me));
//! assert!(turn.is_my_turn());
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::player::PeerId;

/// Whose turn it is, from this client's point of view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Every client starts here before the first sync.
    #[default]
    MyTurn,
    OpponentTurn,
}

/// Turn bookkeeping for one client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    phase: TurnPhase,

    /// Turns this client has finished, plus one.
    turn_number: u32,

    /// Seat order of the room.
    seats: Vec<PeerId>,

    /// Peer whose turn it is, when known.
    active: Option<PeerId>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            phase: TurnPhase::MyTurn,
            turn_number: 1,
            seats: Vec::new(),
            active: None,
        }
    }
}

impl TurnState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.phase == TurnPhase::MyTurn
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Peer currently believed to be acting.
    #[must_use]
    pub fn active(&self) -> Option<PeerId> {
        self.active
    }

    #[must_use]
    pub fn seats(&self) -> &[PeerId] {
        &self.seats
    }

    /// Replace the seat order.
    pub fn set_seats(&mut self, seats: Vec<PeerId>) {
        self.seats = seats;
    }

    /// Seat after `peer`, wrapping. `None` if `peer` is not seated or the
    /// seat order is unknown.
    #[must_use]
    pub fn next_seat(&self, peer: PeerId) -> Option<PeerId> {
        let idx = self.seats.iter().position(|&p| p == peer)?;
        self.seats.get((idx + 1) % self.seats.len()).copied()
    }

    /// End our own turn. No-op (returns false) unless it is `MyTurn`.
    pub fn finish_my_turn(&mut self, me: PeerId) -> bool {
        if !self.is_my_turn() {
            return false;
        }
        self.phase = TurnPhase::OpponentTurn;
        self.turn_number += 1;
        self.active = self.next_seat(me);
        true
    }

    /// Handle another peer's turn-end. Returns true if the turn is now ours.
    pub fn receive_turn_end(&mut self, from: PeerId, me: PeerId) -> bool {
        let next = if self.seats.len() > 2 { self.next_seat(from) } else { None };

        match next {
            Some(next) => {
                self.active = Some(next);
                self.phase = if next == me {
                    TurnPhase::MyTurn
                } else {
                    TurnPhase::OpponentTurn
                };
            }
            None => {
                self.active = Some(me);
                self.phase = TurnPhase::MyTurn;
            }
        }

        if self.is_my_turn() {
            info!("{} ended their turn, {} to play", from, me);
        }
        self.is_my_turn()
    }
}
