//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for creatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterId(pub Uuid);

impl MonsterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MonsterId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for constructed facilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub Uuid);

impl BuildingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BuildingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for hired personnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(pub Uuid);

impl StaffId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StaffId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game day counter (simulation time unit)
pub type Day = u64;

/// Creature element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Pyro,
    Hydro,
    Geo,
    Aero,
    Chrono,
    Bio,
}

impl Element {
    pub const ALL: [Element; 6] = [
        Element::Pyro,
        Element::Hydro,
        Element::Geo,
        Element::Aero,
        Element::Chrono,
        Element::Bio,
    ];

    /// Elements this element deals bonus damage against.
    /// Each element is strong against exactly two others.
    pub fn strong_against(self) -> [Element; 2] {
        match self {
            Element::Pyro => [Element::Bio, Element::Aero],
            Element::Hydro => [Element::Pyro, Element::Geo],
            Element::Geo => [Element::Aero, Element::Chrono],
            Element::Aero => [Element::Bio, Element::Hydro],
            Element::Chrono => [Element::Hydro, Element::Pyro],
            Element::Bio => [Element::Geo, Element::Chrono],
        }
    }

    pub fn is_effective_against(self, other: Element) -> bool {
        self.strong_against().contains(&other)
    }

    /// The stat a hatchling of this element gets a head start in, if any.
    pub fn signature_stat(self) -> Option<StatKind> {
        match self {
            Element::Pyro => Some(StatKind::Attack),
            Element::Geo => Some(StatKind::Defense),
            Element::Aero => Some(StatKind::Speed),
            Element::Chrono => Some(StatKind::Intelligence),
            Element::Hydro | Element::Bio => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Element::Pyro => "Pyro",
            Element::Hydro => "Hydro",
            Element::Geo => "Geo",
            Element::Aero => "Aero",
            Element::Chrono => "Chrono",
            Element::Bio => "Bio",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Playable corporate factions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    GeoForge,
    BioGenesis,
    AetherVanguard,
}

impl Faction {
    pub const ALL: [Faction; 3] = [
        Faction::GeoForge,
        Faction::BioGenesis,
        Faction::AetherVanguard,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Faction::GeoForge => "GeoForge Industries",
            Faction::BioGenesis => "BioGenesis Corp",
            Faction::AetherVanguard => "Aether Vanguard",
        }
    }

    /// The two factions competing against this one.
    pub fn rivals(self) -> [Faction; 2] {
        match self {
            Faction::GeoForge => [Faction::BioGenesis, Faction::AetherVanguard],
            Faction::BioGenesis => [Faction::GeoForge, Faction::AetherVanguard],
            Faction::AetherVanguard => [Faction::GeoForge, Faction::BioGenesis],
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Combat-relevant creature attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub intelligence: f64,
}

impl Stats {
    pub fn new(attack: f64, defense: f64, speed: f64, intelligence: f64) -> Self {
        Self {
            attack,
            defense,
            speed,
            intelligence,
        }
    }

    pub fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Speed => self.speed,
            StatKind::Intelligence => self.intelligence,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut f64 {
        match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
            StatKind::Intelligence => &mut self.intelligence,
        }
    }
}

/// Keyed access into a `Stats` record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
    Intelligence,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Attack,
        StatKind::Defense,
        StatKind::Speed,
        StatKind::Intelligence,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
            StatKind::Speed => "speed",
            StatKind::Intelligence => "intelligence",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-keyed resource bundle. Also used for costs, rewards, production
/// deltas and refunds; fields may be negative in delta contexts. The core
/// never clamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub credits: f64,
    pub biomass: f64,
    pub mana: f64,
    pub research: f64,
}

impl Resources {
    pub fn new(credits: f64, biomass: f64, mana: f64, research: f64) -> Self {
        Self {
            credits,
            biomass,
            mana,
            research,
        }
    }

    pub fn add(&mut self, other: &Resources) {
        self.credits += other.credits;
        self.biomass += other.biomass;
        self.mana += other.mana;
        self.research += other.research;
    }

    pub fn sub(&mut self, other: &Resources) {
        self.credits -= other.credits;
        self.biomass -= other.biomass;
        self.mana -= other.mana;
        self.research -= other.research;
    }

    pub fn scale(&self, factor: f64) -> Resources {
        Resources {
            credits: self.credits * factor,
            biomass: self.biomass * factor,
            mana: self.mana * factor,
            research: self.research * factor,
        }
    }

    /// Per-field floor, used for refunds and upgrade costs.
    pub fn floor(&self) -> Resources {
        Resources {
            credits: self.credits.floor(),
            biomass: self.biomass.floor(),
            mana: self.mana.floor(),
            research: self.research.floor(),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Credits => self.credits,
            ResourceKind::Biomass => self.biomass,
            ResourceKind::Mana => self.mana,
            ResourceKind::Research => self.research,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut f64 {
        match kind {
            ResourceKind::Credits => &mut self.credits,
            ResourceKind::Biomass => &mut self.biomass,
            ResourceKind::Mana => &mut self.mana,
            ResourceKind::Research => &mut self.research,
        }
    }
}

/// Keyed access into a `Resources` bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Credits,
    Biomass,
    Mana,
    Research,
}

impl ResourceKind {
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Credits => "Credits",
            ResourceKind::Biomass => "Biomass",
            ResourceKind::Mana => "Mana",
            ResourceKind::Research => "Research",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Staff roles, each gating a different cost/chance multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRole {
    Scientist,
    Trainer,
    Explorer,
    BeastMaster,
}

impl StaffRole {
    pub const ALL: [StaffRole; 4] = [
        StaffRole::Scientist,
        StaffRole::Trainer,
        StaffRole::Explorer,
        StaffRole::BeastMaster,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StaffRole::Scientist => "Scientist",
            StaffRole::Trainer => "Trainer",
            StaffRole::Explorer => "Explorer",
            StaffRole::BeastMaster => "Beast Master",
        }
    }

    /// One-time hiring fee in credits
    pub fn hire_cost(self) -> f64 {
        match self {
            StaffRole::Scientist => 200.0,
            StaffRole::Trainer => 150.0,
            StaffRole::Explorer => 150.0,
            StaffRole::BeastMaster => 300.0,
        }
    }

    /// Per-tick salary in credits
    pub fn salary(self) -> f64 {
        match self {
            StaffRole::Scientist => 10.0,
            StaffRole::Trainer => 8.0,
            StaffRole::Explorer => 5.0,
            StaffRole::BeastMaster => 12.0,
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Hired personnel record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: StaffRole,
    pub skill: u32,
    pub salary: f64,
}

/// Building categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Resource,
    Training,
    Lab,
    Defense,
}

impl BuildingKind {
    pub fn label(self) -> &'static str {
        match self {
            BuildingKind::Resource => "resource",
            BuildingKind::Training => "training",
            BuildingKind::Lab => "lab",
            BuildingKind::Defense => "defense",
        }
    }
}

/// A constructed facility instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub kind: BuildingKind,
    pub level: u32,
    /// Original cost paid, the basis for upgrade pricing and sale refunds
    pub cost: Resources,
    pub production: Option<Resources>,
    pub description: String,
    /// Hex id `"q,r"` the facility stands on
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_chart_is_symmetric_in_size() {
        // Every element is strong against exactly two others
        for el in Element::ALL {
            assert_eq!(el.strong_against().len(), 2);
        }
    }

    #[test]
    fn test_element_effectiveness() {
        assert!(Element::Pyro.is_effective_against(Element::Bio));
        assert!(Element::Pyro.is_effective_against(Element::Aero));
        assert!(!Element::Pyro.is_effective_against(Element::Hydro));
    }

    #[test]
    fn test_faction_rivals() {
        let rivals = Faction::GeoForge.rivals();
        assert!(!rivals.contains(&Faction::GeoForge));
        assert_eq!(rivals.len(), 2);
    }

    #[test]
    fn test_resources_arithmetic() {
        let mut res = Resources::new(100.0, 50.0, 25.0, 0.0);
        res.add(&Resources::new(10.0, 0.0, 5.0, 1.0));
        assert_eq!(res.credits, 110.0);
        assert_eq!(res.mana, 30.0);
        res.sub(&Resources::new(200.0, 0.0, 0.0, 0.0));
        // Core never clamps; negatives are allowed by contract
        assert_eq!(res.credits, -90.0);
    }

    #[test]
    fn test_resources_scale_and_floor() {
        let cost = Resources::new(150.0, 0.0, 25.0, 10.0);
        let refund = cost.scale(0.5).floor();
        assert_eq!(refund.credits, 75.0);
        assert_eq!(refund.mana, 12.0);
        assert_eq!(refund.research, 5.0);
    }

    #[test]
    fn test_stat_keyed_access() {
        let mut stats = Stats::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(stats.get(StatKind::Speed), 3.0);
        *stats.get_mut(StatKind::Attack) += 10.0;
        assert_eq!(stats.attack, 11.0);
    }
}
