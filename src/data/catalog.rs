//! Catalog data: buildings, spells, trophies, name pools
//!
//! Everything here is fixed content consumed by the intent layer and the
//! reducer; none of it is persisted except through the instances it stamps
//! out.

use serde::{Deserialize, Serialize};

use crate::core::types::{BuildingKind, Faction, ResourceKind, Resources, StatKind};

/// A constructible facility template
#[derive(Debug, Clone)]
pub struct BuildingTemplate {
    pub name: &'static str,
    pub kind: BuildingKind,
    pub cost: Resources,
    pub production: Option<Resources>,
    pub description: &'static str,
}

/// The six constructible facilities.
pub fn building_catalog() -> Vec<BuildingTemplate> {
    vec![
        BuildingTemplate {
            name: "Bio-Reactor",
            kind: BuildingKind::Resource,
            cost: Resources::new(150.0, 0.0, 0.0, 10.0),
            production: Some(Resources::new(0.0, 5.0, 0.0, 0.0)),
            description: "Generates Biomass from organic waste.",
        },
        BuildingTemplate {
            name: "Mana Pylon",
            kind: BuildingKind::Resource,
            cost: Resources::new(200.0, 50.0, 0.0, 0.0),
            production: Some(Resources::new(0.0, 0.0, 3.0, 0.0)),
            description: "Harvests ambient magical energy.",
        },
        BuildingTemplate {
            name: "Mining Rig",
            kind: BuildingKind::Resource,
            cost: Resources::new(200.0, 20.0, 0.0, 0.0),
            production: Some(Resources::new(5.0, 0.0, 0.0, 0.0)),
            description: "Extracts valuable minerals.",
        },
        BuildingTemplate {
            name: "Research Lab",
            kind: BuildingKind::Lab,
            cost: Resources::new(300.0, 0.0, 20.0, 0.0),
            production: Some(Resources::new(0.0, 0.0, 0.0, 2.0)),
            description: "Generates Research points. Allows advanced bio-synthesis.",
        },
        BuildingTemplate {
            name: "Training Dojo",
            kind: BuildingKind::Training,
            cost: Resources::new(250.0, 100.0, 0.0, 0.0),
            production: None,
            description: "Allows training of monsters to increase stats.",
        },
        BuildingTemplate {
            name: "Drone Hub",
            kind: BuildingKind::Defense,
            cost: Resources::new(400.0, 0.0, 0.0, 50.0),
            production: None,
            description: "Unlocks the ability to capture wild monsters detected on the map.",
        },
    ]
}

pub fn building_template(name: &str) -> Option<BuildingTemplate> {
    building_catalog().into_iter().find(|t| t.name == name)
}

/// Buff payload carried by a spell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffSpec {
    pub stat: StatKind,
    pub value: f64,
    pub name: String,
}

/// A castable ritual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: Resources,
    /// HP drained from the target; the drain always leaves at least 1 HP
    pub hp_cost: f64,
    /// Advertised immediate yield; kept as catalog data for display
    pub effect: Resources,
    pub buff: Option<BuffSpec>,
    pub target_required: bool,
}

/// Spell id with bespoke heal handling in the reducer.
pub const HEAL_SPELL_ID: &str = "heal_minor";

/// HP restored by the minor regeneration ritual.
pub const HEAL_SPELL_AMOUNT: f64 = 30.0;

fn stat_buff(id: &str, name: &str, description: &str, mana: f64, stat: StatKind, buff_name: &str) -> Spell {
    Spell {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        cost: Resources::new(0.0, 0.0, mana, 0.0),
        hp_cost: 0.0,
        effect: Resources::default(),
        buff: Some(BuffSpec {
            stat,
            value: 20.0,
            name: buff_name.into(),
        }),
        target_required: true,
    }
}

/// The seven known rituals.
pub fn spell_catalog() -> Vec<Spell> {
    vec![
        Spell {
            id: "alch_transmute".into(),
            name: "Alchemical Transmutation".into(),
            description: "Convert 50 Mana into 100 Credits.".into(),
            cost: Resources::new(0.0, 0.0, 50.0, 0.0),
            hp_cost: 0.0,
            effect: Resources::new(100.0, 0.0, 0.0, 0.0),
            buff: None,
            target_required: false,
        },
        Spell {
            id: "verdant_surge".into(),
            name: "Verdant Surge".into(),
            description: "Accelerate growth. 40 Mana -> 80 Biomass.".into(),
            cost: Resources::new(0.0, 0.0, 40.0, 0.0),
            hp_cost: 0.0,
            effect: Resources::new(0.0, 80.0, 0.0, 0.0),
            buff: None,
            target_required: false,
        },
        Spell {
            id: "blood_rite".into(),
            name: "Crimson Rite".into(),
            description: "Drain 20 HP from a creature to gain 40 Mana.".into(),
            cost: Resources::default(),
            hp_cost: 20.0,
            effect: Resources::new(0.0, 0.0, 40.0, 0.0),
            buff: None,
            target_required: true,
        },
        stat_buff(
            "enrage",
            "Feral Rage",
            "+20 Attack for the next battle.",
            30.0,
            StatKind::Attack,
            "Enraged",
        ),
        stat_buff(
            "stone_skin",
            "Stone Skin",
            "+20 Defense for the next battle.",
            30.0,
            StatKind::Defense,
            "Armored",
        ),
        stat_buff(
            "haste",
            "Temporal Haste",
            "+20 Speed for the next battle.",
            30.0,
            StatKind::Speed,
            "Quickened",
        ),
        Spell {
            id: HEAL_SPELL_ID.into(),
            name: "Minor Regeneration".into(),
            description: "Restore 30 HP.".into(),
            cost: Resources::new(0.0, 0.0, 25.0, 0.0),
            hp_cost: 0.0,
            effect: Resources::default(),
            buff: None,
            target_required: true,
        },
    ]
}

pub fn spell_by_id(id: &str) -> Option<Spell> {
    spell_catalog().into_iter().find(|s| s.id == id)
}

/// A tournament trophy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trophy {
    pub id: String,
    pub name: String,
    pub description: String,
    pub bonus: String,
    pub icon: String,
}

/// Trophy id granting passive credits each tick.
pub const CREDIT_TROPHY_ID: &str = "bronze_cup";

pub fn trophy_catalog() -> Vec<Trophy> {
    vec![
        Trophy {
            id: CREDIT_TROPHY_ID.into(),
            name: "Novice Cup".into(),
            description: "Winner of a Regional Skirmish.".into(),
            bonus: "+5 Credits/tick".into(),
            icon: "Trophy".into(),
        },
        Trophy {
            id: "silver_shield".into(),
            name: "Iron Shield".into(),
            description: "Survivor of the Badlands Tournament.".into(),
            bonus: "+10% Defense to all".into(),
            icon: "Shield".into(),
        },
        Trophy {
            id: "gold_crown".into(),
            name: "Chimera Crown".into(),
            description: "Champion of the Planetary League.".into(),
            bonus: "+20% Attack to all".into(),
            icon: "Crown".into(),
        },
    ]
}

/// NPC faction names for tournament brackets.
pub const RIVAL_NAMES: [&str; 8] = [
    "Shadow Syndicate",
    "Iron Legion",
    "Crimson Raiders",
    "Void Walkers",
    "Solar Sentinels",
    "Lunar Cult",
    "Toxic Avengers",
    "Cyber Psychos",
];

// Anatomy part pools for generated creatures
pub const TRUNKS: [&str; 8] = [
    "Humanoid",
    "Bestial",
    "Insectoid",
    "Amorphous",
    "Serpentine",
    "Avian",
    "Mechanical",
    "Plantoid",
];

pub const HEADS: [&str; 8] = [
    "Reptilian",
    "Canine",
    "Insectoid",
    "Featureless",
    "Horned",
    "Glowing",
    "Skull",
    "Floral",
];

pub const APPENDAGES: [&str; 8] = [
    "Wings",
    "Claws",
    "Tentacles",
    "Cybernetic Arms",
    "Fins",
    "Spikes",
    "Vines",
    "Jets",
];

/// Starting resource pool before the faction bonus.
pub fn initial_resources() -> Resources {
    Resources::new(500.0, 200.0, 100.0, 0.0)
}

/// One-time starting bonus applied when a faction is founded.
pub fn faction_bonus(faction: Faction) -> Resources {
    match faction {
        Faction::GeoForge => Resources::new(200.0, 0.0, 0.0, 0.0),
        Faction::BioGenesis => Resources::new(0.0, 100.0, 0.0, 0.0),
        Faction::AetherVanguard => Resources::new(0.0, 0.0, 50.0, 0.0),
    }
}

/// Forage outcome table: which resource a scavenging run turns up.
pub fn forage_kind(first_roll: f64, second_roll: f64) -> ResourceKind {
    if first_roll > 0.6 {
        ResourceKind::Biomass
    } else if second_roll > 0.5 {
        ResourceKind::Mana
    } else {
        ResourceKind::Credits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup_by_name() {
        let t = building_template("Bio-Reactor").unwrap();
        assert_eq!(t.cost.credits, 150.0);
        assert_eq!(t.cost.research, 10.0);
        assert_eq!(t.production.unwrap().biomass, 5.0);
        assert!(building_template("Mega Tower").is_none());
    }

    #[test]
    fn test_spell_lookup() {
        let heal = spell_by_id(HEAL_SPELL_ID).unwrap();
        assert!(heal.target_required);
        assert_eq!(heal.cost.mana, 25.0);

        let rite = spell_by_id("blood_rite").unwrap();
        assert_eq!(rite.hp_cost, 20.0);

        let rage = spell_by_id("enrage").unwrap();
        assert_eq!(rage.buff.unwrap().stat, StatKind::Attack);
    }

    #[test]
    fn test_trophy_catalog_ids_are_unique() {
        let trophies = trophy_catalog();
        assert_eq!(trophies.len(), 3);
        for (i, a) in trophies.iter().enumerate() {
            for b in &trophies[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_faction_bonuses() {
        assert_eq!(faction_bonus(Faction::GeoForge).credits, 200.0);
        assert_eq!(faction_bonus(Faction::BioGenesis).biomass, 100.0);
        assert_eq!(faction_bonus(Faction::AetherVanguard).mana, 50.0);
    }

    #[test]
    fn test_forage_table() {
        assert_eq!(forage_kind(0.7, 0.0), ResourceKind::Biomass);
        assert_eq!(forage_kind(0.5, 0.6), ResourceKind::Mana);
        assert_eq!(forage_kind(0.5, 0.4), ResourceKind::Credits);
    }
}
