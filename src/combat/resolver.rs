//! Single-attack resolution
//!
//! `resolve_attack` is a pure function of the two combatant snapshots and
//! the injected random source; it never touches game state.

use rand::Rng;

use crate::core::types::StatKind;
use crate::monster::Monster;

/// Crit chance before anatomy modifiers.
const BASE_CRIT_CHANCE: f64 = 0.05;

/// Crit chance once a slashing appendage is in play.
const SLASH_CRIT_CHANCE: f64 = 0.15;

/// Outcome of one attack
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    /// Final damage, floored to a whole number
    pub damage: f64,
    pub is_crit: bool,
    pub is_effective: bool,
    /// Attack verb for the battle feed, e.g. "slashes with Claws"
    pub verb: String,
}

/// Resolve a single attack from `attacker` against `defender`.
pub fn resolve_attack<R: Rng>(attacker: &Monster, defender: &Monster, rng: &mut R) -> AttackOutcome {
    let atk = attacker.effective_stat(StatKind::Attack);
    let def = defender.effective_stat(StatKind::Defense);

    let mut damage = (atk * 0.5 - def * 0.25).max(5.0);

    let is_effective = attacker.element.is_effective_against(defender.element);
    if is_effective {
        damage *= 1.5;
    }

    // Anatomy: slashing appendages sharpen the attack, once per exchange.
    // Later qualifying parts may still take over the verb.
    let mut verb = "strikes".to_string();
    let mut crit_chance = BASE_CRIT_CHANCE;
    let mut slash_applied = false;
    for part in &attacker.anatomy.appendages {
        if part.contains("Claw") || part.contains("Spike") {
            if !slash_applied {
                damage *= 1.1;
                crit_chance = SLASH_CRIT_CHANCE;
                slash_applied = true;
            }
            verb = format!("slashes with {part}");
        } else if part.contains("Wing") || part.contains("Jet") {
            verb = format!("dives using {part}");
        }
    }

    let is_crit = rng.gen_bool(crit_chance);
    if is_crit {
        damage *= 1.5;
    }

    let variance = rng.gen::<f64>() * 0.2 + 0.9;
    let damage = (damage * variance).floor();

    AttackOutcome {
        damage,
        is_crit,
        is_effective,
        verb,
    }
}
