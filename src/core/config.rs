//! Game tuning constants with documented purposes
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Values are preserved as tuned;
//! changing them shifts pacing, not correctness.

/// Configuration for the game-state core
#[derive(Debug, Clone)]
pub struct GameConfig {
    // === MAP ===
    /// Hex-distance radius of the generated map. Radius 4 yields 61 tiles.
    pub map_radius: i32,

    /// Chance per generated tile of hosting a tournament ground.
    pub tournament_tile_chance: f64,

    // === EXPLORATION ===
    /// Base credit cost of an expedition before staff discounts.
    pub explore_base_cost: f64,

    /// Credit discount per hired Explorer.
    pub explore_discount_per_explorer: f64,

    /// Expedition cost never drops below this.
    pub explore_min_cost: f64,

    /// Chance that an expedition turns up a wild specimen instead of a
    /// resource event.
    pub wild_spawn_chance: f64,

    // === TERRITORY ===
    /// Flat credit cost to claim an unowned explored tile.
    pub claim_cost: f64,

    /// Flat credit cost of a sabotage mission against a rival tile.
    pub sabotage_cost: f64,

    // === CAPTURE ===
    /// Credit cost of deploying a capture drone, charged win or lose.
    pub capture_cost: f64,

    /// Base capture probability before modifiers.
    pub capture_base_chance: f64,

    /// Capture probability bonus per hired Beast Master.
    pub capture_per_beast_master: f64,

    /// Capture probability penalty per wild-monster level.
    pub capture_level_penalty: f64,

    /// Capture probability never exceeds this.
    pub capture_chance_cap: f64,

    // === SYNTHESIS & TRAINING ===
    /// Biomass cost of hatching a new creature.
    pub hatch_cost: f64,

    /// Per-level base for training costs; each session costs
    /// `level * this` in both biomass and mana before discounts.
    pub training_cost_per_level: f64,

    /// Training discount per hired Trainer.
    pub training_discount_per_trainer: f64,

    /// Combined Trainer discount is capped here; training never becomes
    /// more than half price from staff alone.
    pub training_discount_cap: f64,

    /// Cost multiplier when an owned tile's biome favors the trained stat.
    pub training_biome_multiplier: f64,

    // === ECONOMY ===
    /// Fraction of original cost refunded per field when selling, floored.
    pub refund_rate: f64,

    /// Credits per unit when buying biomass on the exchange.
    pub buy_biomass_rate: f64,

    /// Credits per unit when selling biomass on the exchange.
    pub sell_biomass_rate: f64,

    /// Credits trickling in per tick before salaries.
    pub base_credit_trickle: f64,

    /// Research generated per Scientist per tick.
    pub research_per_scientist: f64,

    /// Passive credits per tick granted by the Novice Cup trophy.
    pub trophy_tick_credits: f64,

    // === RIVAL SIMULATION ===
    /// Chance per tick that rivals expand their territory.
    pub rival_expansion_chance: f64,

    /// Chance per tick that one rival wins an off-screen tournament,
    /// bumping its win/score tally.
    pub rival_score_bump_chance: f64,

    // === BATTLE REWARDS ===
    /// Base credit reward for a won match.
    pub reward_base: f64,

    /// Additional credits per battle round survived.
    pub reward_per_round: f64,

    /// Grand prize credits for winning an entire tournament.
    pub grand_prize: f64,

    /// Chance of a trophy dropping on a tournament victory.
    pub trophy_drop_chance: f64,

    // === LOGS ===
    /// The player-visible log feed keeps only this many recent entries.
    pub log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_radius: 4,
            tournament_tile_chance: 0.1,

            explore_base_cost: 50.0,
            explore_discount_per_explorer: 5.0,
            explore_min_cost: 10.0,
            wild_spawn_chance: 0.25,

            claim_cost: 100.0,
            sabotage_cost: 300.0,

            capture_cost: 150.0,
            capture_base_chance: 0.40,
            capture_per_beast_master: 0.15,
            capture_level_penalty: 0.05,
            capture_chance_cap: 0.95,

            hatch_cost: 100.0,
            training_cost_per_level: 10.0,
            training_discount_per_trainer: 0.1,
            training_discount_cap: 0.5,
            training_biome_multiplier: 0.8,

            refund_rate: 0.5,
            buy_biomass_rate: 2.0,
            sell_biomass_rate: 0.5,
            base_credit_trickle: 1.0,
            research_per_scientist: 0.5,
            trophy_tick_credits: 5.0,

            rival_expansion_chance: 0.4,
            rival_score_bump_chance: 0.1,

            reward_base: 150.0,
            reward_per_round: 10.0,
            grand_prize: 1000.0,
            trophy_drop_chance: 0.5,

            log_capacity: 50,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.map_radius < 1 {
            return Err("map_radius must be at least 1".into());
        }

        if self.explore_min_cost > self.explore_base_cost {
            return Err(format!(
                "explore_min_cost ({}) should be <= explore_base_cost ({})",
                self.explore_min_cost, self.explore_base_cost
            ));
        }

        for (name, p) in [
            ("tournament_tile_chance", self.tournament_tile_chance),
            ("wild_spawn_chance", self.wild_spawn_chance),
            ("capture_base_chance", self.capture_base_chance),
            ("capture_chance_cap", self.capture_chance_cap),
            ("rival_expansion_chance", self.rival_expansion_chance),
            ("rival_score_bump_chance", self.rival_score_bump_chance),
            ("trophy_drop_chance", self.trophy_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} ({p}) must be a probability in [0, 1]"));
            }
        }

        if self.log_capacity == 0 {
            return Err("log_capacity must be positive".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<GameConfig> = OnceLock::new();

/// Get the global game config (initializes with defaults if not set)
pub fn config() -> &'static GameConfig {
    CONFIG.get_or_init(GameConfig::default)
}

/// Set the global game config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: GameConfig) -> Result<(), GameConfig> {
    CONFIG.set(config)
}
