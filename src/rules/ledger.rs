//! Lore ledger.
//!
//! Lore only ever changes by a signed delta. Increments always apply;
//! decrements stop at 0. In team play a delta from any team member applies
//! to every player on that team, matched by team colour rather than by
//! identity, so teammates always show the same total.
//!
//! The relay applies the same function to the room it owns, and each client
//! adopts the relay's roster when it arrives.

use serde::{Deserialize, Serialize};

use crate::core::player::{PeerId, Player, Team};

/// Apply a lore delta from `from` to a roster.
///
/// Returns false if `from` is not on the roster.
pub fn apply_lore_delta(players: &mut [Player], from: PeerId, delta: i32, team_play: bool) -> bool {
    let Some(sender) = players.iter().find(|p| p.id == from) else {
        return false;
    };
    let team = if team_play { sender.team } else { None };

    for player in players.iter_mut() {
        let affected = match team {
            Some(team) => player.team == Some(team),
            None => player.id == from,
        };
        if affected {
            player.lore = shift_lore(player.lore, delta);
        }
    }
    true
}

fn shift_lore(lore: u32, delta: i32) -> u32 {
    if delta >= 0 {
        lore.saturating_add(delta.unsigned_abs())
    } else {
        lore.saturating_sub(delta.unsigned_abs())
    }
}

/// Lore totals for every player in the room.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoreLedger {
    players: Vec<Player>,
    team_play: bool,
}

impl LoreLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the roster's lore values wholesale.
    pub fn replace_from_roster(&mut self, players: &[Player], team_play: bool) {
        self.players = players.to_vec();
        self.team_play = team_play;
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn is_team_play(&self) -> bool {
        self.team_play
    }

    /// Lore of one player, 0 if unknown.
    #[must_use]
    pub fn lore_of(&self, peer: PeerId) -> u32 {
        self.players
            .iter()
            .find(|p| p.id == peer)
            .map_or(0, |p| p.lore)
    }

    /// Highest lore on a team.
    #[must_use]
    pub fn team_lore(&self, team: Team) -> u32 {
        self.players
            .iter()
            .filter(|p| p.team == Some(team))
            .map(|p| p.lore)
            .max()
            .unwrap_or(0)
    }

    /// True if `peer` has at least `threshold` lore.
    #[must_use]
    pub fn reached(&self, peer: PeerId, threshold: u32) -> bool {
        self.lore_of(peer) >= threshold
    }

    pub fn clear(&mut self) {
        self.players.clear();
        self.team_play = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Player> {
        vec![
            Player::new(PeerId(1), "A").with_team(Team::Blue),
            Player::new(PeerId(2), "B").with_team(Team::Red),
            Player::new(PeerId(3), "C").with_team(Team::Blue),
            Player::new(PeerId(4), "D").with_team(Team::Red).with_lore(5),
        ]
    }

    #[test]
    fn test_solo_delta() {
        let mut players = roster();
        assert!(apply_lore_delta(&mut players, PeerId(1), 3, false));

        assert_eq!(players[0].lore, 3);
        assert_eq!(players[2].lore, 0);
    }

    #[test]
    fn test_team_delta_spreads() {
        let mut players = roster();
        apply_lore_delta(&mut players, PeerId(1), 3, true);

        assert_eq!(players[0].lore, 3);
        assert_eq!(players[2].lore, 3);
        assert_eq!(players[1].lore, 0);
        assert_eq!(players[3].lore, 5);
    }

    #[test]
    fn test_decrement_floors() {
        let mut players = roster();
        apply_lore_delta(&mut players, PeerId(4), -9, false);
        assert_eq!(players[3].lore, 0);
    }

    #[test]
    fn test_unknown_sender() {
        let mut players = roster();
        assert!(!apply_lore_delta(&mut players, PeerId(9), 3, true));
        assert!(players.iter().take(3).all(|p| p.lore == 0));
    }

    #[test]
    fn test_teamless_sender_in_team_play() {
        let mut players = vec![Player::new(PeerId(1), "A"), Player::new(PeerId(2), "B")];
        apply_lore_delta(&mut players, PeerId(1), 2, true);

        assert_eq!(players[0].lore, 2);
        assert_eq!(players[1].lore, 0);
    }

    #[test]
    fn test_ledger_queries() {
        let mut players = roster();
        apply_lore_delta(&mut players, PeerId(2), 15, true);
        let mut ledger = LoreLedger::new();
        ledger.replace_from_roster(&players, true);

        assert_eq!(ledger.lore_of(PeerId(4)), 20);
        assert_eq!(ledger.team_lore(Team::Red), 20);
        assert_eq!(ledger.team_lore(Team::Blue), 0);
        assert_eq!(ledger.lore_of(PeerId(2)), 15);
        assert!(ledger.reached(PeerId(4), 20));
        assert!(!ledger.reached(PeerId(2), 20));
        assert_eq!(ledger.lore_of(PeerId(9)), 0);
    }
}
