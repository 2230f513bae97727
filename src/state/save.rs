//! Whole-state snapshot persistence
//!
//! The entire `GameState` aggregate is the save surface; the snapshot is
//! reloadable as-is.

use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::state::GameState;

pub fn save(state: &GameState, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    tracing::info!("game state saved to {}", path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<GameState> {
    let json = fs::read_to_string(path)?;
    let state = serde_json::from_str(&json)?;
    tracing::info!("game state loaded from {}", path.display());
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Faction;
    use crate::state::{Action, Store};

    #[test]
    fn test_snapshot_roundtrip() {
        let mut store = Store::new(42);
        store.dispatch(Action::SelectFaction {
            faction: Faction::AetherVanguard,
        });

        let dir = std::env::temp_dir().join("terra-chimera-save-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snapshot.json");

        save(&store.state, &path).unwrap();
        let restored = load(&path).unwrap();

        assert_eq!(restored.faction, Some(Faction::AetherVanguard));
        assert_eq!(restored.resources, store.state.resources);
        assert_eq!(restored.day, store.state.day);
        assert_eq!(restored.logs.len(), store.state.logs.len());

        fs::remove_file(&path).unwrap();
    }
}
