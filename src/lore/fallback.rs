//! Deterministic local fallbacks for the lore gateway
//!
//! Used whenever the gateway is unconfigured, unreachable, or returns
//! something unparseable. The game must read the same either way.

use crate::core::types::Element;
use crate::lore::{CreatureLore, ExplorationEvent, RewardKind};
use crate::monster::Anatomy;

/// Templated creature description keyed only off the element.
pub fn creature_fallback(element: Element) -> CreatureLore {
    CreatureLore {
        name: format!("{element} Specimen"),
        description: "A mysterious creature synthesized from raw biomass. Genetic sequencing incomplete."
            .into(),
        traits: vec!["Unstable".into(), "Synthesized".into()],
        anatomy: Anatomy::new("Amorphous", "Featureless", &["Tentacles"]),
    }
}

/// Neutral no-reward expedition report.
pub fn exploration_fallback() -> ExplorationEvent {
    ExplorationEvent {
        message: "Sensors picked up interference. Data inconclusive.".into(),
        reward_type: RewardKind::None,
        amount: 0.0,
    }
}
