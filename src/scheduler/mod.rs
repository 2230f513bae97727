//! Tick scheduler
//!
//! The only time-driven mutation in the game. Each tick computes a
//! production delta from staff and buildings, rolls rival map expansion,
//! and dispatches exactly one `Tick` action. Only the tick count (`day`)
//! matters; no wall-clock time is persisted.

use std::collections::HashMap;

use rand::Rng;

use crate::core::config::config;
use crate::core::types::{Resources, StaffRole};
use crate::map::HexTile;
use crate::state::{Action, GameState, Store};

/// Compute this tick's production delta and rival expansion patch.
pub fn build_tick_action<R: Rng>(state: &GameState, rng: &mut R) -> Action {
    Action::Tick {
        production: production_delta(state),
        map_update: rival_expansion(state, rng),
    }
}

/// Advance the game by one tick.
pub fn run_tick(store: &mut Store) {
    let action = build_tick_action(&store.state, &mut store.rng);
    store.dispatch(action);
    tracing::debug!(day = store.state.day, "tick applied");
}

/// Base credit trickle minus salaries, research per scientist, plus every
/// facility's per-tick output.
fn production_delta(state: &GameState) -> Resources {
    let cfg = config();
    let total_salary: f64 = state.staff.iter().map(|s| s.salary).sum();
    let scientists = state.staff_count(StaffRole::Scientist) as f64;

    let mut production = Resources::new(
        cfg.base_credit_trickle - total_salary,
        0.0,
        0.0,
        scientists * cfg.research_per_scientist,
    );
    for building in &state.buildings {
        if let Some(output) = &building.production {
            production.add(output);
        }
    }
    production
}

/// Behind one expansion roll per tick, each rival picks one of its tiles
/// at random and annexes a random unowned neighbor. Annexed tiles drop
/// back into fog from the player's perspective.
fn rival_expansion<R: Rng>(state: &GameState, rng: &mut R) -> HashMap<String, HexTile> {
    let mut patch = HashMap::new();
    let Some(faction) = state.faction else {
        return patch;
    };
    if !rng.gen_bool(config().rival_expansion_chance) {
        return patch;
    }

    // Sorted snapshot so the random picks are reproducible for a seed
    let mut tiles: Vec<&HexTile> = state.map.values().collect();
    tiles.sort_by_key(|t| (t.q, t.r));

    for rival in faction.rivals() {
        let rival_tiles: Vec<&&HexTile> =
            tiles.iter().filter(|t| t.owner == Some(rival)).collect();
        if rival_tiles.is_empty() {
            continue;
        }
        let base = rival_tiles[rng.gen_range(0..rival_tiles.len())];

        let candidates: Vec<&HexTile> = base
            .coord()
            .neighbors()
            .iter()
            .filter_map(|n| state.map.get(&n.id()))
            .filter(|t| t.owner.is_none())
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let target = candidates[rng.gen_range(0..candidates.len())];
        let mut annexed = target.clone();
        annexed.owner = Some(rival);
        annexed.is_explored = false;
        patch.insert(annexed.id.clone(), annexed);
    }

    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{
        Building, BuildingId, Faction, Staff, StaffId,
    };
    use crate::core::types::BuildingKind;
    use crate::map::generation;
    use rand::rngs::mock::StepRng;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded_state() -> GameState {
        let mut state = GameState::new();
        state.faction = Some(Faction::GeoForge);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        state.map = generation::generate(4, Faction::GeoForge, &mut rng);
        state
    }

    #[test]
    fn test_production_formula() {
        let mut state = seeded_state();
        state.staff.push(Staff {
            id: StaffId::new(),
            name: "Staff 1".into(),
            role: StaffRole::Scientist,
            skill: 1,
            salary: StaffRole::Scientist.salary(),
        });
        state.staff.push(Staff {
            id: StaffId::new(),
            name: "Staff 2".into(),
            role: StaffRole::Explorer,
            skill: 1,
            salary: StaffRole::Explorer.salary(),
        });
        state.buildings.push(Building {
            id: BuildingId::new(),
            name: "Bio-Reactor".into(),
            kind: BuildingKind::Resource,
            level: 1,
            cost: Resources::new(150.0, 0.0, 0.0, 10.0),
            production: Some(Resources::new(0.0, 5.0, 0.0, 0.0)),
            description: String::new(),
            location: "0,0".into(),
        });

        let delta = production_delta(&state);
        // 1 - (10 + 5) salaries
        assert_eq!(delta.credits, -14.0);
        assert_eq!(delta.research, 0.5);
        assert_eq!(delta.biomass, 5.0);
        assert_eq!(delta.mana, 0.0);
    }

    #[test]
    fn test_expansion_gate_closed_produces_no_patch() {
        let state = seeded_state();
        // Max rng: gen_bool(0.4) fails, no expansion this tick
        let mut rng = StepRng::new(u64::MAX, 0);
        let patch = rival_expansion(&state, &mut rng);
        assert!(patch.is_empty());
    }

    #[test]
    fn test_expansion_annexes_unowned_neighbors_into_fog() {
        let state = seeded_state();
        // Zero rng: the gate opens and the first tile/neighbor is picked
        let mut rng = StepRng::new(0, 0);
        let patch = rival_expansion(&state, &mut rng);

        assert!(!patch.is_empty());
        for tile in patch.values() {
            let rival = tile.owner.expect("annexed tile has an owner");
            assert_ne!(rival, Faction::GeoForge);
            assert!(!tile.is_explored);
            // The pre-expansion tile really was unowned
            assert!(state.map[&tile.id].owner.is_none());
        }
    }

    #[test]
    fn test_tick_action_advances_day_through_store() {
        let mut store = Store::new(3);
        store.dispatch(Action::SelectFaction {
            faction: Faction::GeoForge,
        });
        store.state.map =
            generation::generate(4, Faction::GeoForge, &mut ChaCha8Rng::seed_from_u64(4));

        let day = store.state.day;
        run_tick(&mut store);
        assert_eq!(store.state.day, day + 1);
        // Base trickle with no staff or buildings
        assert_eq!(store.state.resources.credits, 701.0);
    }
}
