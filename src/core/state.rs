//! Session state for one client.
//!
//! ## Table
//!
//! `Table` is the single context object a client owns. It holds:
//! - The local board (sole writer) and the read-only mirrors of other boards
//! - Turn, lore and challenge state
//! - Room membership as last reported by the relay
//! - An outbox of messages for the relay, drained after each command
//!
//! Commands live in `core::action`, inbound message handling in
//! `sync::dispatch`. Both run to completion before returning, so there is
//! never a half-applied mutation for the presentation layer to observe.

use std::collections::VecDeque;

use log::trace;

use super::config::{GameMode, TableConfig};
use super::entity::{CardUid, RoomId};
use super::player::{PeerId, Player, Team};
use super::rng::GameRng;
use crate::rules::{ChallengeState, LoreLedger, Outcome, Terminal, TurnState};
use crate::sync::{Mirrors, Outbound, Snapshot};
use crate::zones::PlayerBoard;

/// Per-client game session.
#[derive(Clone, Debug)]
pub struct Table {
    // === Configuration ===
    pub(crate) config: TableConfig,
    pub(crate) rng: GameRng,

    // === Connection and room ===
    pub(crate) peer: Option<PeerId>,
    pub(crate) connected: bool,
    pub(crate) player_name: String,
    pub(crate) room: Option<RoomId>,
    pub(crate) roster: Vec<Player>,
    pub(crate) game_mode: GameMode,
    pub(crate) join_error: Option<String>,

    // === Game ===
    pub(crate) board: PlayerBoard,
    pub(crate) mirrors: Mirrors,
    pub(crate) turn: TurnState,
    pub(crate) ledger: LoreLedger,
    pub(crate) challenge: ChallengeState,
    pub(crate) terminal: Terminal,

    // === Output ===
    pub(crate) outbox: VecDeque<Outbound>,
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

impl Table {
    /// Create a session that is not yet connected.
    #[must_use]
    pub fn new(config: TableConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            config,
            peer: None,
            connected: false,
            player_name: String::new(),
            room: None,
            roster: Vec::new(),
            game_mode: GameMode::default(),
            join_error: None,
            board: PlayerBoard::new(),
            mirrors: Mirrors::new(),
            turn: TurnState::new(),
            ledger: LoreLedger::new(),
            challenge: ChallengeState::Idle,
            terminal: Terminal::new(),
            outbox: VecDeque::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Our relay id, or `PeerId::LOCAL` before the relay assigned one.
    #[must_use]
    pub fn me(&self) -> PeerId {
        self.peer.unwrap_or(PeerId::LOCAL)
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn room(&self) -> Option<RoomId> {
        self.room
    }

    #[must_use]
    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    #[must_use]
    pub fn game_mode(&self) -> GameMode {
        self.game_mode
    }

    /// Our team, as the roster reports it.
    #[must_use]
    pub fn my_team(&self) -> Option<Team> {
        let me = self.me();
        self.roster.iter().find(|p| p.id == me).and_then(|p| p.team)
    }

    /// Reason the last join attempt failed.
    #[must_use]
    pub fn join_error(&self) -> Option<&str> {
        self.join_error.as_deref()
    }

    #[must_use]
    pub fn board(&self) -> &PlayerBoard {
        &self.board
    }

    #[must_use]
    pub fn mirrors(&self) -> &Mirrors {
        &self.mirrors
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.turn.is_my_turn()
    }

    #[must_use]
    pub fn ledger(&self) -> &LoreLedger {
        &self.ledger
    }

    /// Our lore total.
    #[must_use]
    pub fn my_lore(&self) -> u32 {
        self.ledger.lore_of(self.me())
    }

    #[must_use]
    pub fn challenge(&self) -> ChallengeState {
        self.challenge
    }

    /// Outcome to show, `None` while playing or after dismissal.
    #[must_use]
    pub fn game_over(&self) -> Option<Outcome> {
        self.terminal.game_over()
    }

    #[must_use]
    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    /// Our team's lore in team play, `None` otherwise.
    #[must_use]
    pub fn team_lore(&self) -> Option<u32> {
        if !self.ledger.is_team_play() {
            return None;
        }
        self.my_team().map(|team| self.ledger.team_lore(team))
    }

    // === Outbox ===

    /// Messages queued for the relay, without removing them.
    pub fn pending(&self) -> impl Iterator<Item = &Outbound> + '_ {
        self.outbox.iter()
    }

    /// Take every queued message, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<Outbound> {
        self.outbox.drain(..).collect()
    }

    /// Queue a room-scoped message; dropped when not in a room.
    pub(crate) fn emit_to_room(&mut self, build: impl FnOnce(RoomId) -> Outbound) -> bool {
        match self.room {
            Some(room_id) => {
                self.outbox.push_back(build(room_id));
                true
            }
            None => false,
        }
    }

    /// Send the masked board to the room.
    pub(crate) fn sync_board(&mut self) {
        if self.room.is_none() {
            return;
        }
        let snapshot = Snapshot::masked(&self.board.zones);
        trace!("syncing {} cards", snapshot.len());
        self.emit_to_room(|room_id| Outbound::UpdateCards { room_id, snapshot });
    }

    /// Fresh uid that no local card uses.
    pub(crate) fn fresh_uid(&mut self) -> CardUid {
        loop {
            let uid = CardUid::new(self.rng.next_u64());
            if !self.board.zones.contains(uid) {
                return uid;
            }
        }
    }

    /// Latch a win once our lore reaches the threshold.
    pub(crate) fn check_win(&mut self) {
        if self.terminal.is_over() {
            return;
        }
        let won = match self.team_lore() {
            Some(lore) => lore >= self.config.win_lore,
            None => self.ledger.reached(self.me(), self.config.win_lore),
        };
        if won {
            self.terminal.latch(Outcome::Win);
        }
    }
}
