//! Derived-cost calculators consumed by the intent layer

pub mod costs;

pub use costs::{capture_chance, exploration_cost, training_cost, upgrade_cost, upgraded_production};
