//! Command execution - validates intents and dispatches actions
//!
//! Failed pre-checks surface as alert log entries, never as errors; the
//! reducer is only ever handed payloads this layer has priced and checked.
//! Gateway-backed intents debit their cost before the call and keep it
//! spent on fallback.

use rand::Rng;

use crate::core::config::config;
use crate::core::types::{
    Building, BuildingId, Element, Faction, MonsterId, ResourceKind, Resources, Staff, StaffId,
    StaffRole, StatKind,
};
use crate::data::catalog;
use crate::economy::costs;
use crate::lore::{fallback, LoreClient};
use crate::map::generation;
use crate::monster::genesis;
use crate::state::{Action, BattlePhase, LogKind, Store};
use crate::tournament::MatchStatus;

/// Executes player intents against the store
pub struct CommandExecutor<'a> {
    store: &'a mut Store,
    lore: Option<&'a LoreClient>,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(store: &'a mut Store, lore: Option<&'a LoreClient>) -> Self {
        Self { store, lore }
    }

    fn alert(&mut self, message: impl Into<String>) {
        self.store.dispatch(Action::AddLog {
            kind: LogKind::Alert,
            message: message.into(),
        });
    }

    fn log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.store.dispatch(Action::AddLog {
            kind,
            message: message.into(),
        });
    }

    fn player_faction(&self) -> Option<Faction> {
        self.store.state.faction
    }

    /// Found the company and generate the planet. One-time; later calls
    /// are swallowed by the reducer's one-shot guard.
    pub fn select_faction(&mut self, faction: Faction) {
        self.store.dispatch(Action::SelectFaction { faction });
        if self.store.state.map.is_empty() {
            let radius = config().map_radius;
            let map = generation::generate(radius, faction, &mut self.store.rng);
            self.store.dispatch(Action::InitMap { map });
        }
    }

    /// Synthesize a new creature. Biomass is charged before the gateway
    /// call; incubation failure still consumes it.
    pub async fn hatch(&mut self, element: Element) {
        let cost = config().hatch_cost;
        if self.store.state.resources.biomass < cost {
            self.alert("Insufficient Biomass!");
            return;
        }

        self.store.dispatch(Action::UpdateResources {
            delta: Resources::new(0.0, -cost, 0.0, 0.0),
        });

        let mut stats = genesis::roll_base_stats(10.0, &mut self.store.rng);
        genesis::apply_element_affinity(&mut stats, element);

        let lore = match self.lore {
            Some(client) => client.describe_creature(element, &stats).await,
            None => fallback::creature_fallback(element),
        };

        let monster = genesis::hatchling(element, stats, lore, &mut self.store.rng);
        let name = monster.name.clone();
        self.store.dispatch(Action::AddMonster { monster });
        self.log(LogKind::Success, format!("Synthesis complete: {name} born."));
    }

    /// Send an expedition into an adjacent unexplored sector.
    pub async fn explore(&mut self, hex_id: &str) {
        if !generation::is_explorable(&self.store.state.map, hex_id) {
            self.alert("Sector is out of expedition range.");
            return;
        }

        let cost = costs::exploration_cost(&self.store.state);
        if self.store.state.resources.credits < cost {
            self.alert("Insufficient credits for expedition.");
            return;
        }

        self.store.dispatch(Action::UpdateResources {
            delta: Resources::new(-cost, 0.0, 0.0, 0.0),
        });

        let faction_name = self
            .player_faction()
            .map_or("Unknown", Faction::display_name);
        let biomes = self
            .store
            .state
            .map
            .get(hex_id)
            .map(|t| t.biomes.clone())
            .unwrap_or_default();

        let event = match self.lore {
            Some(client) => client.exploration_event(faction_name, &biomes).await,
            None => fallback::exploration_fallback(),
        };

        let mut reward = Resources::default();
        let mut wild_monster = None;

        if self.store.rng.gen_bool(config().wild_spawn_chance) {
            let element = Element::ALL[self.store.rng.gen_range(0..Element::ALL.len())];
            let stats = genesis::roll_base_stats(8.0, &mut self.store.rng);
            let lore = match self.lore {
                Some(client) => client.describe_creature(element, &stats).await,
                None => fallback::creature_fallback(element),
            };
            wild_monster = Some(genesis::wild_specimen(
                element,
                stats,
                lore,
                &mut self.store.rng,
            ));
            self.alert(format!("ALERT: Wild lifeform detected in Sector {hex_id}."));
        } else {
            reward = event.reward_bundle();
            self.log(LogKind::Discovery, event.message);
        }

        self.store.dispatch(Action::ExploreHex {
            hex_id: hex_id.to_string(),
            reward,
            wild_monster,
        });
    }

    /// Construct a facility from the catalog on an owned, explored,
    /// unoccupied sector.
    pub fn build(&mut self, template_name: &str, hex_id: &str) {
        let Some(template) = catalog::building_template(template_name) else {
            self.alert(format!("Unknown facility: {template_name}."));
            return;
        };
        let (explored, owner, occupied) = match self.store.state.map.get(hex_id) {
            Some(tile) => (tile.is_explored, tile.owner, tile.building_id.is_some()),
            None => {
                self.alert(format!("Unknown sector [{hex_id}]."));
                return;
            }
        };
        if !explored {
            self.alert("Sector is unexplored.");
            return;
        }
        if owner != self.player_faction() {
            self.alert("Territory must be claimed before building.");
            return;
        }
        if occupied {
            self.alert("Sector already occupied.");
            return;
        }

        let resources = &self.store.state.resources;
        if resources.credits < template.cost.credits
            || resources.biomass < template.cost.biomass
            || resources.mana < template.cost.mana
        {
            self.alert("Insufficient resources.");
            return;
        }

        let building = Building {
            id: BuildingId::new(),
            name: template.name.to_string(),
            kind: template.kind,
            level: 1,
            cost: template.cost,
            production: template.production,
            description: template.description.to_string(),
            location: hex_id.to_string(),
        };
        self.store.dispatch(Action::Build {
            building,
            cost: template.cost,
            hex_id: hex_id.to_string(),
        });
    }

    /// Upgrade a facility in place: cost scales with the current level,
    /// production with the next.
    pub fn upgrade_building(&mut self, building_id: BuildingId) {
        let Some(building) = self.store.state.building(building_id) else {
            self.alert("Facility no longer exists.");
            return;
        };
        let name = building.name.clone();
        let level = building.level;
        let hex_id = building.location.clone();

        let Some(template) = catalog::building_template(&name) else {
            self.alert(format!("No upgrade path for {name}."));
            return;
        };

        let cost = costs::upgrade_cost(&template, level);
        let resources = &self.store.state.resources;
        if resources.credits < cost.credits
            || resources.biomass < cost.biomass
            || resources.mana < cost.mana
            || resources.research < cost.research
        {
            self.alert("Insufficient resources for upgrade.");
            return;
        }

        let new_production = costs::upgraded_production(&template, level);
        self.store.dispatch(Action::UpgradeBuilding {
            building_id,
            hex_id,
            cost,
            new_production,
        });
    }

    pub fn sell_building(&mut self, building_id: BuildingId) {
        let Some(building) = self.store.state.building(building_id) else {
            self.alert("Facility no longer exists.");
            return;
        };
        let hex_id = building.location.clone();
        self.store.dispatch(Action::SellBuilding {
            building_id,
            hex_id,
        });
    }

    pub fn claim(&mut self, hex_id: &str) {
        let cost = config().claim_cost;
        if self.store.state.resources.credits < cost {
            self.alert("Insufficient credits to claim territory.");
            return;
        }
        self.store.dispatch(Action::ClaimHex {
            hex_id: hex_id.to_string(),
            cost,
        });
    }

    /// Neutralize a rival sector, destroying any structure on it.
    pub fn sabotage(&mut self, hex_id: &str) {
        let owner = self.store.state.map.get(hex_id).and_then(|t| t.owner);
        match owner {
            Some(f) if Some(f) != self.player_faction() => {}
            _ => {
                self.alert("Sabotage requires a rival-held sector.");
                return;
            }
        }

        let cost = config().sabotage_cost;
        if self.store.state.resources.credits < cost {
            self.alert("Insufficient credits for sabotage mission.");
            return;
        }
        self.store.dispatch(Action::SabotageHex {
            hex_id: hex_id.to_string(),
            cost,
        });
    }

    /// Scavenge an explored sector for a small random pickup.
    pub fn forage(&mut self, hex_id: &str) {
        if !self
            .store
            .state
            .map
            .get(hex_id)
            .is_some_and(|t| t.is_explored)
        {
            self.alert("Sector must be explored before foraging.");
            return;
        }

        let amount = self.store.rng.gen_range(1..=10) as f64;
        let kind = catalog::forage_kind(self.store.rng.gen(), self.store.rng.gen());

        let mut delta = Resources::default();
        *delta.get_mut(kind) = amount;
        self.store.dispatch(Action::UpdateResources { delta });
        self.log(
            LogKind::Info,
            format!("Foraged {amount} {kind} from Sector [{hex_id}]."),
        );
    }

    /// Deploy a capture drone against the wild monster on a sector.
    pub fn capture(&mut self, hex_id: &str) {
        let Some(monster_id) = self
            .store
            .state
            .map
            .get(hex_id)
            .and_then(|t| t.wild_monster_id)
        else {
            self.alert("No wild lifeform detected there.");
            return;
        };
        let Some(monster) = self
            .store
            .state
            .wild_monsters
            .iter()
            .find(|m| m.id == monster_id)
            .cloned()
        else {
            return;
        };

        if !self.store.state.has_building_named("Drone Hub") {
            self.alert("Requires a Drone Hub to attempt capture.");
            return;
        }

        let cost = config().capture_cost;
        if self.store.state.resources.credits < cost {
            self.alert("Insufficient credits to deploy capture drone.");
            return;
        }

        let chance = costs::capture_chance(&self.store.state, &monster);
        let success = self.store.rng.gen_bool(chance);
        self.store.dispatch(Action::CaptureMonster {
            hex_id: hex_id.to_string(),
            success,
            cost,
        });
    }

    /// Run one training session in the dojo.
    pub fn train(&mut self, monster_id: MonsterId, stat: StatKind) {
        let Some(monster) = self.store.state.monster(monster_id).cloned() else {
            self.alert("Specimen not found.");
            return;
        };
        if !self.store.state.has_building_named("Training Dojo") {
            self.alert("Requires a Training Dojo.");
            return;
        }

        let cost = costs::training_cost(&self.store.state, &monster, stat);
        let resources = &self.store.state.resources;
        if resources.biomass < cost.biomass || resources.mana < cost.mana {
            self.alert(format!(
                "Insufficient resources to train. Need {} Bio / {} Mana.",
                cost.biomass, cost.mana
            ));
            return;
        }

        self.store.dispatch(Action::TrainMonster {
            monster_id,
            stat,
            cost,
        });
    }

    pub fn hire(&mut self, role: StaffRole) {
        let cost = role.hire_cost();
        if self.store.state.resources.credits < cost {
            self.alert("Insufficient credits to hire staff.");
            return;
        }

        let staff = Staff {
            id: StaffId::new(),
            name: format!("Staff {}", self.store.rng.gen_range(0..1000)),
            role,
            skill: 1,
            salary: role.salary(),
        };
        self.store.dispatch(Action::HireStaff { staff, cost });
    }

    pub fn dismiss(&mut self, staff_id: StaffId) {
        self.store.dispatch(Action::DismissStaff { staff_id });
    }

    /// Buy biomass with credits on the exchange.
    pub fn trade_buy_biomass(&mut self, amount: f64) {
        let cost = amount * config().buy_biomass_rate;
        if self.store.state.resources.credits < cost {
            self.alert(format!(
                "Insufficient Credits to buy {amount} Biomass. Need {cost} Cr."
            ));
            return;
        }
        self.store.dispatch(Action::TradeResources {
            cost_kind: ResourceKind::Credits,
            cost_amount: cost,
            gain_kind: ResourceKind::Biomass,
            gain_amount: amount,
        });
    }

    /// Sell biomass for credits on the exchange.
    pub fn trade_sell_biomass(&mut self, amount: f64) {
        if self.store.state.resources.biomass < amount {
            self.alert("Insufficient Biomass to sell.");
            return;
        }
        let gain = amount * config().sell_biomass_rate;
        self.store.dispatch(Action::TradeResources {
            cost_kind: ResourceKind::Biomass,
            cost_amount: amount,
            gain_kind: ResourceKind::Credits,
            gain_amount: gain,
        });
    }

    pub fn cast_spell(&mut self, spell_id: &str, target_id: Option<MonsterId>) {
        let Some(spell) = catalog::spell_by_id(spell_id) else {
            self.alert(format!("Unknown ritual: {spell_id}."));
            return;
        };
        if spell.cost.mana > 0.0 && self.store.state.resources.mana < spell.cost.mana {
            self.alert(format!("Not enough Mana for {}.", spell.name));
            return;
        }

        if spell.target_required {
            let Some(target_id) = target_id else {
                self.alert(format!("Select a target creature for {}.", spell.name));
                return;
            };
            let Some(target) = self.store.state.monster(target_id) else {
                self.alert("Target creature not found.");
                return;
            };
            if spell.hp_cost > 0.0 && target.current_hp <= spell.hp_cost {
                self.alert("Target too weak to survive ritual.");
                return;
            }
        }

        self.store.dispatch(Action::CastSpell { spell, target_id });
    }

    /// Enter the tournament hosted on a sector. Bracket size scales with
    /// career wins.
    pub fn enter_tournament(&mut self, hex_id: &str) {
        let Some(tile) = self.store.state.map.get(hex_id) else {
            self.alert(format!("Unknown sector [{hex_id}]."));
            return;
        };
        if !tile.is_explored || !tile.tournament_available() {
            self.alert("No open tournament at that sector.");
            return;
        }

        let wins = self
            .player_faction()
            .and_then(|f| self.store.state.faction_stats.get(&f))
            .map_or(0, |s| s.wins);
        let rounds = if wins > 8 {
            4
        } else if wins > 3 {
            3
        } else {
            2
        };

        self.store.dispatch(Action::InitTournament {
            hex_id: hex_id.to_string(),
            rounds,
        });
    }

    /// Stage the player's pending bracket match: generates the opponent
    /// creature and moves the battle session to planning.
    pub fn start_match(&mut self, match_id: &str) {
        let staged = match self.store.state.tournament.match_by_id(match_id) {
            None => Err("No such match."),
            Some(m) if !m.involves_player() || m.status != MatchStatus::Ready => {
                Err("That match is not ready for you.")
            }
            Some(m) => match m.opponent_of_player() {
                None => Err("Opponent slot is still empty."),
                Some(entry) => Ok((
                    entry
                        .monster_name
                        .clone()
                        .unwrap_or_else(|| "Unknown Beast".to_string()),
                    m.round,
                )),
            },
        };
        let (monster_name, round) = match staged {
            Ok(staged) => staged,
            Err(message) => {
                self.alert(message);
                return;
            }
        };
        let avg_level = self.store.state.average_monster_level().max(1.0);

        let opponent =
            genesis::tournament_opponent(&monster_name, round, avg_level, &mut self.store.rng);
        self.store.dispatch(Action::PrepareBattle {
            opponent,
            tournament_match_id: Some(match_id.to_string()),
        });
    }

    /// Commit a roster creature to the prepared battle.
    pub fn start_battle(&mut self, monster_id: MonsterId) {
        let Some(monster) = self.store.state.monster(monster_id) else {
            self.alert("Specimen not found.");
            return;
        };
        if !monster.is_alive() {
            self.alert("That specimen is in no state to fight.");
            return;
        }
        let Some(opponent) = self.store.state.battle.opponent.clone() else {
            self.alert("No opponent staged.");
            return;
        };

        self.store.dispatch(Action::StartBattle {
            player_monster_id: monster_id,
            opponent,
        });
    }

    pub fn next_round(&mut self) {
        if !self.store.state.battle.is_active
            || self.store.state.battle.phase != BattlePhase::Planning
        {
            self.alert("No battle round to resolve.");
            return;
        }
        self.store.dispatch(Action::NextRound);
    }

    /// Conclude a finished battle, folding the result into the bracket,
    /// history, and faction standings.
    pub fn end_battle(&mut self) {
        let won = match self.store.state.battle.phase {
            BattlePhase::Victory => true,
            BattlePhase::Defeat => false,
            _ => {
                self.alert("The battle is not over yet.");
                return;
            }
        };
        self.store.dispatch(Action::EndBattle { won });
    }

    /// Recovery control for a corrupted battle session (active flag set
    /// but combatants missing).
    pub fn reset_battle(&mut self) {
        self.store.dispatch(Action::ResetBattle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Store;

    fn founded_store() -> Store {
        let mut store = Store::new(42);
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.select_faction(Faction::GeoForge);
        store
    }

    #[test]
    fn test_select_faction_generates_map_once() {
        let mut store = founded_store();
        assert_eq!(store.state.map.len(), 61);

        let before: Vec<String> = store.state.map.keys().cloned().collect();
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.select_faction(Faction::BioGenesis);
        // Second selection is a no-op: same faction, same map
        assert_eq!(store.state.faction, Some(Faction::GeoForge));
        assert_eq!(store.state.map.len(), before.len());
    }

    #[tokio::test]
    async fn test_hatch_insufficient_biomass_leaves_roster_empty() {
        let mut store = founded_store();
        store.state.resources.biomass = 10.0;

        let mut executor = CommandExecutor::new(&mut store, None);
        executor.hatch(Element::Pyro).await;

        assert!(store.state.monsters.is_empty());
        assert_eq!(store.state.resources.biomass, 10.0);
        assert_eq!(store.state.logs.entries()[0].kind, LogKind::Alert);
    }

    #[tokio::test]
    async fn test_hatch_charges_and_adds_monster() {
        let mut store = founded_store();
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.hatch(Element::Pyro).await;

        assert_eq!(store.state.monsters.len(), 1);
        assert_eq!(store.state.resources.biomass, 200.0 - 100.0);
        let monster = &store.state.monsters[0];
        // Fallback lore names the specimen after its element
        assert_eq!(monster.name, "Pyro Specimen");
        assert!(monster.stats.attack >= 20.0);
    }

    #[tokio::test]
    async fn test_explore_requires_adjacency() {
        let mut store = founded_store();
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.explore("-4,0").await;

        assert!(!store.state.map["-4,0"].is_explored);
        assert_eq!(store.state.resources.credits, 700.0);
    }

    #[tokio::test]
    async fn test_explore_charges_and_marks_explored() {
        let mut store = founded_store();
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.explore("2,0").await;

        assert!(store.state.map["2,0"].is_explored);
        // 700 - 50 expedition cost, fallback event grants nothing
        assert_eq!(store.state.resources.credits, 650.0);
    }

    #[test]
    fn test_build_rejects_unclaimed_sector() {
        let mut store = founded_store();
        let mut executor = CommandExecutor::new(&mut store, None);
        // "1,0" is explored but unowned at start
        executor.build("Bio-Reactor", "1,0");

        assert!(store.state.buildings.is_empty());
        assert_eq!(store.state.logs.entries()[0].kind, LogKind::Alert);
    }

    #[test]
    fn test_build_on_owned_sector() {
        let mut store = founded_store();
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.build("Bio-Reactor", "0,0");

        assert_eq!(store.state.buildings.len(), 1);
        assert_eq!(store.state.resources.credits, 700.0 - 150.0);
        // Research was not pre-checked and goes negative
        assert_eq!(store.state.resources.research, -10.0);
        assert!(store.state.map["0,0"].building_id.is_some());
    }

    #[test]
    fn test_trade_round_trip() {
        let mut store = founded_store();
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.trade_buy_biomass(50.0);
        assert_eq!(store.state.resources.credits, 600.0);
        assert_eq!(store.state.resources.biomass, 250.0);

        let mut executor = CommandExecutor::new(&mut store, None);
        executor.trade_sell_biomass(100.0);
        assert_eq!(store.state.resources.credits, 650.0);
        assert_eq!(store.state.resources.biomass, 150.0);
    }

    #[test]
    fn test_capture_requires_drone_hub() {
        let mut store = founded_store();
        // Plant a wild monster on a tile by hand
        let monster = genesis::wild_specimen(
            Element::Bio,
            genesis::roll_base_stats(8.0, &mut store.rng),
            fallback::creature_fallback(Element::Bio),
            &mut store.rng,
        );
        let id = monster.id;
        store.state.wild_monsters.push(monster);
        store.state.map.get_mut("1,0").unwrap().wild_monster_id = Some(id);

        let mut executor = CommandExecutor::new(&mut store, None);
        executor.capture("1,0");

        assert_eq!(store.state.wild_monsters.len(), 1);
        assert!(store.state.monsters.is_empty());
        assert_eq!(store.state.logs.entries()[0].kind, LogKind::Alert);
    }

    #[test]
    fn test_hire_and_salary_wiring() {
        let mut store = founded_store();
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.hire(StaffRole::Scientist);

        assert_eq!(store.state.staff.len(), 1);
        assert_eq!(store.state.resources.credits, 500.0);
        assert_eq!(store.state.staff[0].salary, 10.0);
    }

    #[test]
    fn test_cast_spell_requires_target_when_spell_does() {
        let mut store = founded_store();
        let mut executor = CommandExecutor::new(&mut store, None);
        executor.cast_spell("enrage", None);

        assert_eq!(store.state.resources.mana, 100.0);
        assert_eq!(store.state.logs.entries()[0].kind, LogKind::Alert);
    }

    #[test]
    fn test_enter_tournament_gated_on_open_ground() {
        let mut store = founded_store();
        {
            let tile = store.state.map.get_mut("1,0").unwrap();
            tile.has_tournament = true;
            tile.is_explored = true;
        }

        let mut executor = CommandExecutor::new(&mut store, None);
        executor.enter_tournament("1,0");

        assert!(store.state.tournament.is_active);
        assert_eq!(store.state.tournament.total_rounds, 2);
        assert_eq!(store.state.tournament.matches.len(), 3);
        assert_eq!(store.state.tournament.hex_id.as_deref(), Some("1,0"));
    }

    #[test]
    fn test_bigger_brackets_for_veterans() {
        let mut store = founded_store();
        store
            .state
            .faction_stats
            .get_mut(&Faction::GeoForge)
            .unwrap()
            .wins = 9;
        {
            let tile = store.state.map.get_mut("1,0").unwrap();
            tile.has_tournament = true;
            tile.is_explored = true;
        }

        let mut executor = CommandExecutor::new(&mut store, None);
        executor.enter_tournament("1,0");

        assert_eq!(store.state.tournament.total_rounds, 4);
        assert_eq!(store.state.tournament.participants.len(), 16);
    }
}
