//! The root game-state aggregate and its reducer

pub mod action;
pub mod battle;
pub mod log;
pub mod reducer;
pub mod save;
pub mod store;

pub use action::Action;
pub use battle::{BattlePhase, BattleRecord, BattleState, FactionStats};
pub use log::{LogEntry, LogFeed, LogKind};
pub use store::Store;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{
    Building, BuildingId, Day, Faction, MonsterId, Staff, StaffId, StaffRole,
};
use crate::data::catalog::{self, Trophy};
use crate::map::HexMap;
use crate::monster::Monster;
use crate::tournament::Tournament;

/// Display preferences carried in the save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub text_size: TextSize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            text_size: TextSize::Medium,
        }
    }
}

/// The root aggregate. Exactly one instance exists; every transition goes
/// through `reducer::apply`, and the whole value is the save surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub faction: Option<Faction>,
    pub resources: crate::core::types::Resources,
    pub monsters: Vec<Monster>,
    /// Uncontrolled creatures on the map, keyed into tiles by id
    pub wild_monsters: Vec<Monster>,
    pub buildings: Vec<Building>,
    pub staff: Vec<Staff>,
    pub logs: LogFeed,
    pub day: Day,
    pub map: HexMap,
    pub settings: GameSettings,
    pub trophies: Vec<Trophy>,
    pub battle: BattleState,
    pub battle_history: Vec<BattleRecord>,
    pub faction_stats: HashMap<Faction, FactionStats>,
    pub tournament: Tournament,
    /// Monotonic counters for ids minted inside the reducer
    pub next_buff_id: u64,
    pub next_record_id: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        let faction_stats = Faction::ALL
            .into_iter()
            .map(|f| (f, FactionStats::default()))
            .collect();

        Self {
            faction: None,
            resources: catalog::initial_resources(),
            monsters: Vec::new(),
            wild_monsters: Vec::new(),
            buildings: Vec::new(),
            staff: Vec::new(),
            logs: LogFeed::default(),
            day: 1,
            map: HashMap::new(),
            settings: GameSettings::default(),
            trophies: Vec::new(),
            battle: BattleState::default(),
            battle_history: Vec::new(),
            faction_stats,
            tournament: Tournament::default(),
            next_buff_id: 1,
            next_record_id: 1,
        }
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn staff_member(&self, id: StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| s.id == id)
    }

    pub fn staff_count(&self, role: StaffRole) -> usize {
        self.staff.iter().filter(|s| s.role == role).count()
    }

    pub fn has_building_named(&self, name: &str) -> bool {
        self.buildings.iter().any(|b| b.name == name)
    }

    /// Mean roster level; 0 for an empty roster.
    pub fn average_monster_level(&self) -> f64 {
        if self.monsters.is_empty() {
            return 0.0;
        }
        let total: u32 = self.monsters.iter().map(|m| m.level).sum();
        f64::from(total) / self.monsters.len() as f64
    }
}
