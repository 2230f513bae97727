//! Pure cost and chance functions over the current state
//!
//! Recomputed on every call; never cached in state. Staff effects enter
//! the game exclusively through these multipliers.

use crate::core::config::config;
use crate::core::types::{Resources, StaffRole, StatKind};
use crate::data::catalog::BuildingTemplate;
use crate::map::Biome;
use crate::monster::Monster;
use crate::state::GameState;

/// Expedition cost: a flat base discounted per hired Explorer, floored.
pub fn exploration_cost(state: &GameState) -> f64 {
    let cfg = config();
    let explorers = state.staff_count(StaffRole::Explorer) as f64;
    (cfg.explore_base_cost - cfg.explore_discount_per_explorer * explorers)
        .max(cfg.explore_min_cost)
}

/// Biomes where training the given stat comes cheaper.
fn favored_biomes(stat: StatKind) -> &'static [Biome] {
    match stat {
        StatKind::Attack => &[Biome::Volcanic],
        StatKind::Defense => &[Biome::Mountain],
        StatKind::Speed => &[Biome::Desert, Biome::Wasteland],
        StatKind::Intelligence => &[Biome::Oceanic, Biome::Tundra],
    }
}

/// Training cost in biomass and mana for one session.
///
/// `level * 10` each, discounted by Trainers (capped at half price) and by
/// owning territory whose biome favors the trained stat.
pub fn training_cost(state: &GameState, monster: &Monster, stat: StatKind) -> Resources {
    let cfg = config();
    let base = f64::from(monster.level) * cfg.training_cost_per_level;

    let trainers = state.staff_count(StaffRole::Trainer) as f64;
    let staff_discount = (trainers * cfg.training_discount_per_trainer).min(cfg.training_discount_cap);

    let favored = favored_biomes(stat);
    let owns_favored = state.map.values().any(|tile| {
        tile.owner == state.faction
            && state.faction.is_some()
            && tile.biomes.iter().any(|b| favored.contains(b))
    });
    let biome_multiplier = if owns_favored {
        cfg.training_biome_multiplier
    } else {
        1.0
    };

    let amount = (base * (1.0 - staff_discount) * biome_multiplier).floor();
    Resources::new(0.0, amount, amount, 0.0)
}

/// Capture probability for a wild monster, capped. High-level specimens
/// can push the raw figure below zero, so it is clamped as a probability.
pub fn capture_chance(state: &GameState, monster: &Monster) -> f64 {
    let cfg = config();
    let beast_masters = state.staff_count(StaffRole::BeastMaster) as f64;
    let chance = cfg.capture_base_chance + cfg.capture_per_beast_master * beast_masters
        - cfg.capture_level_penalty * f64::from(monster.level);
    chance.clamp(0.0, cfg.capture_chance_cap)
}

/// Upgrade cost for a facility at `level`: base cost scaled by the current
/// level, floored per field.
pub fn upgrade_cost(template: &BuildingTemplate, level: u32) -> Resources {
    template.cost.scale(f64::from(level)).floor()
}

/// Production after upgrading from `level`: base production scaled to the
/// new level.
pub fn upgraded_production(template: &BuildingTemplate, level: u32) -> Option<Resources> {
    template
        .production
        .as_ref()
        .map(|p| p.scale(f64::from(level + 1)))
}
