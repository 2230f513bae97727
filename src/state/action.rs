//! The action protocol
//!
//! A closed, tagged union of every state change in the game. This is the
//! entire API surface of the core: handlers and the tick scheduler produce
//! actions, the reducer consumes them. Payloads arrive pre-computed; the
//! reducer trusts them (see `reducer`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{
    Building, BuildingId, Faction, MonsterId, ResourceKind, Resources, Staff, StaffId, StatKind,
};
use crate::data::catalog::Spell;
use crate::map::HexTile;
use crate::monster::Monster;
use crate::state::log::LogKind;
use crate::state::GameSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    /// One-time faction choice; applies the starting bonus
    SelectFaction { faction: Faction },
    /// Install the generated map; meaningful only once, at game start
    InitMap { map: HashMap<String, HexTile> },
    /// Advance time by one day. The only action that does.
    Tick {
        production: Resources,
        map_update: HashMap<String, HexTile>,
    },
    Build {
        building: Building,
        cost: Resources,
        hex_id: String,
    },
    UpgradeBuilding {
        building_id: BuildingId,
        hex_id: String,
        cost: Resources,
        new_production: Option<Resources>,
    },
    SellBuilding {
        building_id: BuildingId,
        hex_id: String,
    },
    ClaimHex {
        hex_id: String,
        cost: f64,
    },
    SabotageHex {
        hex_id: String,
        cost: f64,
    },
    ExploreHex {
        hex_id: String,
        reward: Resources,
        wild_monster: Option<Monster>,
    },
    CaptureMonster {
        hex_id: String,
        success: bool,
        cost: f64,
    },
    AddMonster {
        monster: Monster,
    },
    TrainMonster {
        monster_id: MonsterId,
        stat: StatKind,
        cost: Resources,
    },
    HireStaff {
        staff: Staff,
        cost: f64,
    },
    DismissStaff {
        staff_id: StaffId,
    },
    TradeResources {
        cost_kind: ResourceKind,
        cost_amount: f64,
        gain_kind: ResourceKind,
        gain_amount: f64,
    },
    CastSpell {
        spell: Spell,
        target_id: Option<MonsterId>,
    },
    /// Generic signed resource delta (expedition charges, foraging)
    UpdateResources {
        delta: Resources,
    },
    UpdateSettings {
        settings: GameSettings,
    },
    AddLog {
        kind: LogKind,
        message: String,
    },
    DismissLog {
        id: u64,
    },
    ClearLogs,
    // Battle & tournament lifecycle
    InitTournament {
        hex_id: String,
        rounds: u32,
    },
    PrepareBattle {
        opponent: Monster,
        tournament_match_id: Option<String>,
    },
    StartBattle {
        player_monster_id: MonsterId,
        opponent: Monster,
    },
    NextRound,
    EndBattle {
        won: bool,
    },
    ResetBattle,
}
