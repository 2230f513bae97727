//! The game-state reducer
//!
//! One transition function dispatching over the closed action enum. Arms
//! mutate the single aggregate in place; the caller owns sequencing, so no
//! two transitions ever interleave.
//!
//! Contracts:
//! - The reducer performs no affordability validation. Handlers pre-check
//!   before dispatching; a bypassed check drives a resource negative.
//! - Missing-entity payloads (stale ids, unknown hexes) leave the state
//!   unchanged rather than raising.
//! - All randomness flows through the injected `rng` seam.

use rand::Rng;

use crate::combat::round::{resolve_round, RoundOutcome};
use crate::combat::BattleLog;
use crate::core::config::config;
use crate::core::types::{
    Building, BuildingId, Faction, MonsterId, ResourceKind, Resources, Staff, StaffId, StatKind,
};
use crate::data::catalog::{self, Spell};
use crate::monster::{Buff, Monster};
use crate::state::action::Action;
use crate::state::battle::{BattlePhase, BattleRecord, BattleState};
use crate::state::log::LogKind;
use crate::state::GameState;
use crate::tournament::{bracket, Tournament};

/// Apply one action to the state.
pub fn apply<R: Rng>(state: &mut GameState, action: Action, rng: &mut R) {
    match action {
        Action::SelectFaction { faction } => select_faction(state, faction),
        Action::InitMap { map } => state.map = map,
        Action::Tick {
            production,
            map_update,
        } => tick(state, production, map_update, rng),
        Action::Build {
            building,
            cost,
            hex_id,
        } => build(state, building, cost, &hex_id),
        Action::UpgradeBuilding {
            building_id,
            hex_id,
            cost,
            new_production,
        } => upgrade_building(state, building_id, &hex_id, cost, new_production),
        Action::SellBuilding {
            building_id,
            hex_id,
        } => sell_building(state, building_id, &hex_id),
        Action::ClaimHex { hex_id, cost } => claim_hex(state, &hex_id, cost),
        Action::SabotageHex { hex_id, cost } => sabotage_hex(state, &hex_id, cost),
        Action::ExploreHex {
            hex_id,
            reward,
            wild_monster,
        } => explore_hex(state, &hex_id, reward, wild_monster),
        Action::CaptureMonster {
            hex_id,
            success,
            cost,
        } => capture_monster(state, &hex_id, success, cost),
        Action::AddMonster { monster } => add_monster(state, monster),
        Action::TrainMonster {
            monster_id,
            stat,
            cost,
        } => train_monster(state, monster_id, stat, cost, rng),
        Action::HireStaff { staff, cost } => hire_staff(state, staff, cost),
        Action::DismissStaff { staff_id } => dismiss_staff(state, staff_id),
        Action::TradeResources {
            cost_kind,
            cost_amount,
            gain_kind,
            gain_amount,
        } => trade_resources(state, cost_kind, cost_amount, gain_kind, gain_amount),
        Action::CastSpell { spell, target_id } => cast_spell(state, &spell, target_id),
        Action::UpdateResources { delta } => state.resources.add(&delta),
        Action::UpdateSettings { settings } => state.settings = settings,
        Action::AddLog { kind, message } => state.logs.push(state.day, kind, message),
        Action::DismissLog { id } => state.logs.dismiss(id),
        Action::ClearLogs => state.logs.clear(),
        Action::InitTournament { hex_id, rounds } => init_tournament(state, hex_id, rounds, rng),
        Action::PrepareBattle {
            opponent,
            tournament_match_id,
        } => prepare_battle(state, opponent, tournament_match_id),
        Action::StartBattle {
            player_monster_id,
            opponent,
        } => start_battle(state, player_monster_id, opponent),
        Action::NextRound => next_round(state, rng),
        Action::EndBattle { won } => end_battle(state, won, rng),
        Action::ResetBattle => state.battle = BattleState::default(),
    }
}

fn select_faction(state: &mut GameState, faction: Faction) {
    if state.faction.is_some() {
        return;
    }
    state.faction = Some(faction);
    state.resources.add(&catalog::faction_bonus(faction));
    state.logs.push(
        state.day,
        LogKind::Info,
        format!(
            "Company {} founded. Planetary landing successful at Sector (0,0).",
            faction.display_name()
        ),
    );
}

fn tick<R: Rng>(
    state: &mut GameState,
    production: Resources,
    map_update: std::collections::HashMap<String, crate::map::HexTile>,
    rng: &mut R,
) {
    let cfg = config();

    // Trophy-driven passive income
    if state
        .trophies
        .iter()
        .any(|t| t.id == catalog::CREDIT_TROPHY_ID)
    {
        state.resources.credits += cfg.trophy_tick_credits;
    }

    state.resources.add(&production);

    // Off-screen competition: occasionally a rival wins a virtual tournament
    if let Some(faction) = state.faction {
        if rng.gen_bool(cfg.rival_score_bump_chance) {
            let rivals = faction.rivals();
            let lucky = rivals[rng.gen_range(0..rivals.len())];
            if let Some(stats) = state.faction_stats.get_mut(&lucky) {
                stats.wins += 1;
                stats.score += rng.gen_range(10..30) as f64;
            }
        }
    }

    state.day += 1;
    for (id, tile) in map_update {
        state.map.insert(id, tile);
    }
}

fn build(state: &mut GameState, building: Building, cost: Resources, hex_id: &str) {
    let Some(tile) = state.map.get_mut(hex_id) else {
        return;
    };
    tile.building_id = Some(building.id);
    state.resources.sub(&cost);
    state.logs.push(
        state.day,
        LogKind::Success,
        format!("Construction complete: {} at [{hex_id}]", building.name),
    );
    state.buildings.push(building);
}

fn upgrade_building(
    state: &mut GameState,
    building_id: BuildingId,
    hex_id: &str,
    cost: Resources,
    new_production: Option<Resources>,
) {
    let Some(building) = state.buildings.iter_mut().find(|b| b.id == building_id) else {
        return;
    };
    building.level += 1;
    building.production = new_production;
    state.resources.sub(&cost);
    state.logs.push(
        state.day,
        LogKind::Success,
        format!("Facility upgraded at [{hex_id}]"),
    );
}

fn sell_building(state: &mut GameState, building_id: BuildingId, hex_id: &str) {
    let Some(index) = state.buildings.iter().position(|b| b.id == building_id) else {
        return;
    };
    let building = state.buildings.remove(index);

    let refund = building.cost.scale(config().refund_rate).floor();
    state.resources.add(&refund);

    if let Some(tile) = state.map.get_mut(hex_id) {
        tile.building_id = None;
    }
    state.logs.push(
        state.day,
        LogKind::Info,
        format!("Facility {} demolished. Resources salvaged.", building.name),
    );
}

fn claim_hex(state: &mut GameState, hex_id: &str, cost: f64) {
    let faction = state.faction;
    let Some(tile) = state.map.get_mut(hex_id) else {
        return;
    };
    tile.owner = faction;
    state.resources.credits -= cost;
    state.logs.push(
        state.day,
        LogKind::Success,
        format!("Territory claimed: Sector [{hex_id}] secured."),
    );
}

fn sabotage_hex(state: &mut GameState, hex_id: &str, cost: f64) {
    let Some(tile) = state.map.get_mut(hex_id) else {
        return;
    };
    // Destructive: the building is gone, nobody is refunded
    tile.owner = None;
    tile.building_id = None;
    state.resources.credits -= cost;
    state.logs.push(
        state.day,
        LogKind::Success,
        format!("Sabotage successful! Sector [{hex_id}] neutralized."),
    );
}

fn explore_hex(
    state: &mut GameState,
    hex_id: &str,
    reward: Resources,
    wild_monster: Option<Monster>,
) {
    let Some(tile) = state.map.get_mut(hex_id) else {
        return;
    };
    tile.is_explored = true;
    tile.wild_monster_id = wild_monster.as_ref().map(|m| m.id);
    state.resources.add(&reward);
    if let Some(monster) = wild_monster {
        state.wild_monsters.push(monster);
    }
}

fn capture_monster(state: &mut GameState, hex_id: &str, success: bool, cost: f64) {
    let Some(target_id) = state.map.get(hex_id).and_then(|t| t.wild_monster_id) else {
        return;
    };
    let Some(index) = state.wild_monsters.iter().position(|m| m.id == target_id) else {
        return;
    };

    // The drone is spent either way
    state.resources.credits -= cost;
    let monster = state.wild_monsters.remove(index);
    if let Some(tile) = state.map.get_mut(hex_id) {
        tile.wild_monster_id = None;
    }

    if success {
        state.logs.push(
            state.day,
            LogKind::Success,
            format!(
                "Capture successful! {} has been added to the roster.",
                monster.name
            ),
        );
        state.monsters.push(monster);
    } else {
        // The creature escapes the region permanently
        state.logs.push(
            state.day,
            LogKind::Alert,
            "Capture failed. The creature fled into the wilderness. Resources lost.",
        );
    }
}

fn add_monster(state: &mut GameState, monster: Monster) {
    state.logs.push(
        state.day,
        LogKind::Discovery,
        format!(
            "New specimen acquired: {} ({})",
            monster.name, monster.element
        ),
    );
    state.monsters.push(monster);
}

fn train_monster<R: Rng>(
    state: &mut GameState,
    monster_id: MonsterId,
    stat: StatKind,
    cost: Resources,
    rng: &mut R,
) {
    // The session is paid for whether or not the creature still exists
    state.resources.sub(&cost);
    if let Some(monster) = state.monster_mut(monster_id) {
        *monster.stats.get_mut(stat) += rng.gen_range(1..=3) as f64;
        monster.experience += 10;
    }
    state.logs.push(
        state.day,
        LogKind::Info,
        format!("Training complete. Stat {stat} increased."),
    );
}

fn hire_staff(state: &mut GameState, staff: Staff, cost: f64) {
    state.resources.credits -= cost;
    state.logs.push(
        state.day,
        LogKind::Info,
        format!("New staff hired: {} ({})", staff.name, staff.role),
    );
    state.staff.push(staff);
}

fn dismiss_staff(state: &mut GameState, staff_id: StaffId) {
    let Some(index) = state.staff.iter().position(|s| s.id == staff_id) else {
        return;
    };
    let staff = state.staff.remove(index);
    state.logs.push(
        state.day,
        LogKind::Info,
        format!("Staff member {} dismissed.", staff.name),
    );
}

fn trade_resources(
    state: &mut GameState,
    cost_kind: ResourceKind,
    cost_amount: f64,
    gain_kind: ResourceKind,
    gain_amount: f64,
) {
    *state.resources.get_mut(cost_kind) -= cost_amount;
    *state.resources.get_mut(gain_kind) += gain_amount;
    state.logs.push(
        state.day,
        LogKind::Info,
        format!("Trade executed: {cost_amount} {cost_kind} for {gain_amount} {gain_kind}."),
    );
}

fn cast_spell(state: &mut GameState, spell: &Spell, target_id: Option<MonsterId>) {
    state.resources.sub(&spell.cost);

    if let Some(target_id) = target_id {
        let buff_id = state.next_buff_id;
        if let Some(monster) = state.monster_mut(target_id) {
            if spell.hp_cost > 0.0 {
                // A ritual can never itself finish a creature off
                monster.current_hp = (monster.current_hp - spell.hp_cost).max(1.0);
            }
            if spell.id == catalog::HEAL_SPELL_ID {
                monster.current_hp =
                    (monster.current_hp + catalog::HEAL_SPELL_AMOUNT).min(monster.max_hp);
            }
            if let Some(buff) = &spell.buff {
                monster.active_buffs.push(Buff {
                    id: buff_id,
                    name: buff.name.clone(),
                    stat: buff.stat,
                    value: buff.value,
                    description: format!("+{} {}", buff.value, buff.stat),
                });
                state.next_buff_id += 1;
            }
        }

        // Touch the live battle feed when the target is the active combatant
        if state.battle.is_active && state.battle.player_monster_id == Some(target_id) {
            if let Some(monster) = state.monster(target_id) {
                let entry = BattleLog::effect(
                    state.battle.round,
                    format!("Spell cast: {} on {}.", spell.name, monster.name),
                );
                state.battle.logs.push(entry);
            }
        }
    }

    state.logs.push(
        state.day,
        LogKind::Magic,
        format!("Spell cast: {}.", spell.name),
    );
}

fn init_tournament<R: Rng>(state: &mut GameState, hex_id: String, rounds: u32, rng: &mut R) {
    let (matches, participants) = bracket::create_bracket(rounds, rng);
    state.tournament = Tournament {
        is_active: true,
        hex_id: Some(hex_id),
        total_rounds: rounds,
        current_round: 1,
        matches,
        participants,
    };
}

fn prepare_battle(state: &mut GameState, opponent: Monster, tournament_match_id: Option<String>) {
    state.battle = BattleState {
        is_active: false,
        round: 0,
        player_monster_id: None,
        opponent: Some(opponent),
        logs: Vec::new(),
        phase: BattlePhase::Planning,
        tournament_match_id,
    };
}

fn start_battle(state: &mut GameState, player_monster_id: MonsterId, opponent: Monster) {
    state.battle.is_active = true;
    state.battle.round = 1;
    state.battle.player_monster_id = Some(player_monster_id);
    state.battle.opponent = Some(opponent);
    state.battle.logs = vec![BattleLog::info(1, "Battle commencing!")];
    state.battle.phase = BattlePhase::Planning;
}

fn next_round<R: Rng>(state: &mut GameState, rng: &mut R) {
    let Some(player_id) = state.battle.player_monster_id else {
        return;
    };
    let (Some(player), Some(opponent)) = (state.monster(player_id), state.battle.opponent.as_ref())
    else {
        return;
    };

    let result = resolve_round(player, opponent, state.battle.round, rng);

    state.battle.logs.extend(result.logs);
    if let Some(monster) = state.monster_mut(player_id) {
        monster.current_hp = result.player_hp;
    }
    if let Some(opponent) = state.battle.opponent.as_mut() {
        opponent.current_hp = result.opponent_hp;
    }

    match result.outcome {
        RoundOutcome::Continue => {
            state.battle.round += 1;
            state.battle.phase = BattlePhase::Planning;
        }
        RoundOutcome::PlayerVictory => state.battle.phase = BattlePhase::Victory,
        RoundOutcome::PlayerDefeat => state.battle.phase = BattlePhase::Defeat,
    }
}

fn end_battle<R: Rng>(state: &mut GameState, won: bool, rng: &mut R) {
    let cfg = config();

    // Buffs last one battle
    if let Some(player_id) = state.battle.player_monster_id {
        if let Some(monster) = state.monster_mut(player_id) {
            monster.active_buffs.clear();
        }
    }

    // Fold the outcome back into the bracket, if this battle was part of one
    let mut grand_victory = false;
    if let Some(match_id) = state.battle.tournament_match_id.clone() {
        if state.tournament.is_active {
            if won {
                grand_victory = bracket::advance_player_win(&mut state.tournament, &match_id, rng);
            } else {
                bracket::advance_player_loss(&mut state.tournament, &match_id);
            }
        }
    }

    // Rewards
    let mut reward_credits = 0.0;
    let mut reward_text = "None".to_string();
    if won {
        reward_credits = cfg.reward_base + f64::from(state.battle.round) * cfg.reward_per_round;
        if grand_victory {
            reward_credits += cfg.grand_prize;
        }
        reward_text = format!("{reward_credits} Credits");

        if grand_victory && rng.gen_bool(cfg.trophy_drop_chance) {
            let unclaimed: Vec<_> = catalog::trophy_catalog()
                .into_iter()
                .filter(|t| !state.trophies.iter().any(|owned| owned.id == t.id))
                .collect();
            if !unclaimed.is_empty() {
                let trophy = unclaimed[rng.gen_range(0..unclaimed.len())].clone();
                reward_text.push_str(&format!(", {}", trophy.name));
                state.trophies.push(trophy);
            }
        }
    }
    state.resources.credits += reward_credits;

    // Career history and faction tally
    let record = BattleRecord {
        id: state.next_record_id,
        day: state.day,
        opponent_name: state
            .battle
            .opponent
            .as_ref()
            .map_or_else(|| "Unknown".to_string(), |m| m.name.clone()),
        won,
        reward: reward_text,
        rounds: state.battle.round,
    };
    state.next_record_id += 1;
    state.battle_history.insert(0, record);

    if let Some(faction) = state.faction {
        let stats = state.faction_stats.entry(faction).or_default();
        if won {
            stats.wins += 1;
            stats.score += 50.0;
        } else {
            stats.losses += 1;
            stats.score += 5.0;
        }
    }

    let message = if grand_victory {
        format!("TOURNAMENT CHAMPION! Grand prize awarded: {reward_credits} Credits.")
    } else if won {
        format!("Match won! Earned {reward_credits} Credits.")
    } else {
        "Match lost. Specimen injured.".to_string()
    };
    let kind = if won { LogKind::Success } else { LogKind::Alert };
    state.logs.push(state.day, kind, message);

    state.battle = BattleState::default();
}
