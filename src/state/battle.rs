//! Battle session state

use serde::{Deserialize, Serialize};

use crate::combat::BattleLog;
use crate::core::types::{Day, MonsterId};
use crate::monster::Monster;

/// Battle session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    Planning,
    Resolution,
    Victory,
    Defeat,
}

/// The single active combat session. The opponent is a full snapshot, not a
/// roster reference: it is copied in at battle start and mutated
/// independently. Starting a new session overwrites the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    pub is_active: bool,
    pub round: u32,
    pub player_monster_id: Option<MonsterId>,
    pub opponent: Option<Monster>,
    pub logs: Vec<BattleLog>,
    pub phase: BattlePhase,
    /// Links the battle back to a tournament bracket match
    pub tournament_match_id: Option<String>,
}

impl Default for BattleState {
    fn default() -> Self {
        Self {
            is_active: false,
            round: 0,
            player_monster_id: None,
            opponent: None,
            logs: Vec::new(),
            phase: BattlePhase::Planning,
            tournament_match_id: None,
        }
    }
}

/// One line of career battle history; the list is append-only and unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRecord {
    pub id: u64,
    pub day: Day,
    pub opponent_name: String,
    pub won: bool,
    pub reward: String,
    pub rounds: u32,
}

/// Per-faction career tallies; score is a relative ranking signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactionStats {
    pub wins: u32,
    pub losses: u32,
    pub score: f64,
}

impl Default for FactionStats {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            score: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_battle_defaults() {
        let battle = BattleState::default();
        assert!(!battle.is_active);
        assert_eq!(battle.phase, BattlePhase::Planning);
        assert!(battle.opponent.is_none());
    }

    #[test]
    fn test_faction_stats_seed() {
        let stats = FactionStats::default();
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.score, 100.0);
    }
}
