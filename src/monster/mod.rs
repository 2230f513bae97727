//! Creature model: anatomy, buffs, and owned monster instances

pub mod genesis;

use serde::{Deserialize, Serialize};

use crate::core::types::{Element, MonsterId, StatKind, Stats};

/// Body layout, influencing combat flavor and minor modifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anatomy {
    pub trunk: String,
    pub head: String,
    pub appendages: Vec<String>,
}

impl Anatomy {
    pub fn new(trunk: &str, head: &str, appendages: &[&str]) -> Self {
        Self {
            trunk: trunk.into(),
            head: head.into(),
            appendages: appendages.iter().map(|s| (*s).into()).collect(),
        }
    }
}

/// Transient combat stat modifier, cleared when a battle ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub id: u64,
    pub name: String,
    pub stat: StatKind,
    pub value: f64,
    pub description: String,
}

/// An owned creature instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    pub description: String,
    pub element: Element,
    pub level: u32,
    pub experience: u32,
    pub stats: Stats,
    pub max_hp: f64,
    pub current_hp: f64,
    /// Genome quality score in 0-100, affects growth potential
    pub dna_quality: u32,
    pub traits: Vec<String>,
    pub anatomy: Anatomy,
    pub active_buffs: Vec<Buff>,
}

impl Monster {
    /// Base stat plus the sum of active buffs targeting it
    pub fn effective_stat(&self, kind: StatKind) -> f64 {
        let buffed: f64 = self
            .active_buffs
            .iter()
            .filter(|b| b.stat == kind)
            .map(|b| b.value)
            .sum();
        self.stats.get(kind) + buffed
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Stats;

    fn specimen() -> Monster {
        Monster {
            id: MonsterId::new(),
            name: "Test Specimen".into(),
            description: String::new(),
            element: Element::Pyro,
            level: 1,
            experience: 0,
            stats: Stats::new(20.0, 10.0, 15.0, 12.0),
            max_hp: 70.0,
            current_hp: 70.0,
            dna_quality: 50,
            traits: vec![],
            anatomy: Anatomy::new("Bestial", "Horned", &["Claws"]),
            active_buffs: vec![],
        }
    }

    #[test]
    fn test_effective_stat_sums_matching_buffs() {
        let mut m = specimen();
        m.active_buffs.push(Buff {
            id: 1,
            name: "Enraged".into(),
            stat: StatKind::Attack,
            value: 20.0,
            description: "+20 attack".into(),
        });
        m.active_buffs.push(Buff {
            id: 2,
            name: "Quickened".into(),
            stat: StatKind::Speed,
            value: 20.0,
            description: "+20 speed".into(),
        });

        assert_eq!(m.effective_stat(StatKind::Attack), 40.0);
        assert_eq!(m.effective_stat(StatKind::Speed), 35.0);
        assert_eq!(m.effective_stat(StatKind::Defense), 10.0);
    }

    #[test]
    fn test_is_alive() {
        let mut m = specimen();
        assert!(m.is_alive());
        m.current_hp = 0.0;
        assert!(!m.is_alive());
    }
}
