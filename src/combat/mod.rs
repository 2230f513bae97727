//! Turn-based combat: single-attack resolution and the two-exchange round

pub mod resolver;
pub mod round;

pub use resolver::{resolve_attack, AttackOutcome};
pub use round::{resolve_round, RoundOutcome, RoundResult};

use serde::{Deserialize, Serialize};

/// Battle feed entry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleLogKind {
    Attack,
    Defense,
    Effect,
    Info,
}

/// One entry in a battle session's ordered event feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleLog {
    pub round: u32,
    pub message: String,
    pub kind: BattleLogKind,
    pub damage: Option<f64>,
    pub source: Option<String>,
}

impl BattleLog {
    pub fn info(round: u32, message: impl Into<String>) -> Self {
        Self {
            round,
            message: message.into(),
            kind: BattleLogKind::Info,
            damage: None,
            source: None,
        }
    }

    pub fn effect(round: u32, message: impl Into<String>) -> Self {
        Self {
            round,
            message: message.into(),
            kind: BattleLogKind::Effect,
            damage: None,
            source: None,
        }
    }
}
