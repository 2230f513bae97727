//! Flavor-text gateway
//!
//! Narrative content (creature names, descriptions, exploration events) is
//! supplied by an external generative-text service. The core treats it as a
//! best-effort capability: every call fails closed to a deterministic local
//! fallback, and gameplay works fully without it.

pub mod client;
pub mod fallback;

pub use client::LoreClient;

use serde::{Deserialize, Serialize};

use crate::core::types::Resources;
use crate::monster::Anatomy;

/// Structured creature description returned by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureLore {
    pub name: String,
    pub description: String,
    pub traits: Vec<String>,
    pub anatomy: Anatomy,
}

/// What an expedition turned up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Credits,
    Biomass,
    Mana,
    None,
}

/// Structured exploration event returned by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorationEvent {
    pub message: String,
    pub reward_type: RewardKind,
    pub amount: f64,
}

impl ExplorationEvent {
    /// The reward as a resource bundle; empty for `None` rewards.
    pub fn reward_bundle(&self) -> Resources {
        let mut reward = Resources::default();
        match self.reward_type {
            RewardKind::Credits => reward.credits = self.amount,
            RewardKind::Biomass => reward.biomass = self.amount,
            RewardKind::Mana => reward.mana = self.amount,
            RewardKind::None => {}
        }
        reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_bundle_maps_kind() {
        let event = ExplorationEvent {
            message: "A cache of refined ore glints in the dust.".into(),
            reward_type: RewardKind::Credits,
            amount: 80.0,
        };
        let bundle = event.reward_bundle();
        assert_eq!(bundle.credits, 80.0);
        assert_eq!(bundle.biomass, 0.0);

        let nothing = ExplorationEvent {
            message: "Static on every channel.".into(),
            reward_type: RewardKind::None,
            amount: 0.0,
        };
        assert_eq!(nothing.reward_bundle(), Resources::default());
    }
}
