//! Single-writer store: the aggregate plus its deterministic random source

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::state::action::Action;
use crate::state::{reducer, GameState};

/// Owns the one `GameState` instance and the seeded rng every transition
/// draws from. All mutation funnels through `dispatch`.
pub struct Store {
    pub state: GameState,
    /// Random number generator (deterministic)
    pub rng: ChaCha8Rng,
}

impl Store {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Resume from a loaded snapshot.
    pub fn from_state(state: GameState, seed: u64) -> Self {
        Self {
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        reducer::apply(&mut self.state, action, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Faction;
    use crate::state::log::LogKind;

    #[test]
    fn test_dispatch_routes_to_reducer() {
        let mut store = Store::new(42);
        store.dispatch(Action::SelectFaction {
            faction: Faction::GeoForge,
        });
        assert_eq!(store.state.faction, Some(Faction::GeoForge));
        // GeoForge starts with extra credits
        assert_eq!(store.state.resources.credits, 700.0);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = Store::new(7);
        let mut b = Store::new(7);
        for store in [&mut a, &mut b] {
            store.dispatch(Action::SelectFaction {
                faction: Faction::BioGenesis,
            });
            store.dispatch(Action::AddLog {
                kind: LogKind::Info,
                message: "probe".into(),
            });
        }
        assert_eq!(a.state.resources, b.state.resources);
        assert_eq!(a.state.logs.len(), b.state.logs.len());
    }
}
