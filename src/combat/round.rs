//! Two-exchange round resolution
//!
//! Each round the faster combatant strikes first (ties favor the player).
//! A first-strike kill ends the battle before the counter-attack; the
//! second attacker never acts that round.

use rand::Rng;

use crate::combat::resolver::resolve_attack;
use crate::combat::{BattleLog, BattleLogKind};
use crate::core::types::StatKind;
use crate::monster::Monster;

/// How a resolved round left the battle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Both combatants survived; HP changes persist and planning resumes
    Continue,
    PlayerVictory,
    PlayerDefeat,
}

/// Result of resolving one round
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub outcome: RoundOutcome,
    pub player_hp: f64,
    pub opponent_hp: f64,
    pub logs: Vec<BattleLog>,
}

fn attack_logs(
    round: u32,
    attacker: &Monster,
    defender: &Monster,
    hit: &crate::combat::AttackOutcome,
    logs: &mut Vec<BattleLog>,
) {
    logs.push(BattleLog {
        round,
        message: format!("{} {} {}!", attacker.name, hit.verb, defender.name),
        kind: BattleLogKind::Attack,
        damage: Some(hit.damage),
        source: Some(attacker.name.clone()),
    });
    if hit.is_crit {
        logs.push(BattleLog::info(round, "Critical hit!"));
    }
    if hit.is_effective {
        logs.push(BattleLog::info(round, "Super effective!"));
    }
}

/// Resolve one round between the player's combatant and the opponent
/// snapshot. Pure: callers fold the returned HP values back into state.
pub fn resolve_round<R: Rng>(
    player: &Monster,
    opponent: &Monster,
    round: u32,
    rng: &mut R,
) -> RoundResult {
    let player_first =
        player.effective_stat(StatKind::Speed) >= opponent.effective_stat(StatKind::Speed);
    let (first, second) = if player_first {
        (player, opponent)
    } else {
        (opponent, player)
    };

    let mut logs = Vec::new();

    // First exchange
    let hit1 = resolve_attack(first, second, rng);
    attack_logs(round, first, second, &hit1, &mut logs);
    let second_hp = second.current_hp - hit1.damage;

    if second_hp <= 0.0 {
        logs.push(BattleLog::info(
            round,
            format!("{} was defeated!", second.name),
        ));
        let (outcome, player_hp, opponent_hp) = if player_first {
            (RoundOutcome::PlayerVictory, player.current_hp, 0.0)
        } else {
            (RoundOutcome::PlayerDefeat, 0.0, opponent.current_hp)
        };
        return RoundResult {
            outcome,
            player_hp,
            opponent_hp,
            logs,
        };
    }

    // Counter-attack
    let hit2 = resolve_attack(second, first, rng);
    attack_logs(round, second, first, &hit2, &mut logs);
    let first_hp = first.current_hp - hit2.damage;

    if first_hp <= 0.0 {
        logs.push(BattleLog::info(
            round,
            format!("{} was defeated!", first.name),
        ));
        let (outcome, player_hp, opponent_hp) = if player_first {
            (RoundOutcome::PlayerDefeat, 0.0, second_hp)
        } else {
            (RoundOutcome::PlayerVictory, second_hp, 0.0)
        };
        return RoundResult {
            outcome,
            player_hp,
            opponent_hp,
            logs,
        };
    }

    let (player_hp, opponent_hp) = if player_first {
        (first_hp, second_hp)
    } else {
        (second_hp, first_hp)
    };
    RoundResult {
        outcome: RoundOutcome::Continue,
        player_hp,
        opponent_hp,
        logs,
    }
}
