//! Map tiles and biomes

use serde::{Deserialize, Serialize};

use crate::core::types::{BuildingId, Faction, MonsterId, Resources};
use crate::map::hex::HexCoord;

/// Biome tags carried by a tile (1-3 per tile)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Volcanic,
    Oceanic,
    Mountain,
    Tundra,
    Forest,
    Desert,
    Wasteland,
}

impl Biome {
    pub const ALL: [Biome; 7] = [
        Biome::Volcanic,
        Biome::Oceanic,
        Biome::Mountain,
        Biome::Tundra,
        Biome::Forest,
        Biome::Desert,
        Biome::Wasteland,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Biome::Volcanic => "Volcanic",
            Biome::Oceanic => "Oceanic",
            Biome::Mountain => "Mountain",
            Biome::Tundra => "Tundra",
            Biome::Forest => "Forest",
            Biome::Desert => "Desert",
            Biome::Wasteland => "Wasteland",
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single hex tile: the unit of territory, exploration, and construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexTile {
    pub id: String,
    pub q: i32,
    pub r: i32,
    pub s: i32,
    pub biomes: Vec<Biome>,
    pub owner: Option<Faction>,
    pub is_explored: bool,
    pub has_tournament: bool,
    /// Decorative survey estimate; not consumed by production logic.
    pub resource_yield: Resources,
    pub building_id: Option<BuildingId>,
    pub wild_monster_id: Option<MonsterId>,
}

impl HexTile {
    pub fn new(coord: HexCoord) -> Self {
        Self {
            id: coord.id(),
            q: coord.q,
            r: coord.r,
            s: coord.s(),
            biomes: Vec::new(),
            owner: None,
            is_explored: false,
            has_tournament: false,
            resource_yield: Resources::default(),
            building_id: None,
            wild_monster_id: None,
        }
    }

    pub fn coord(&self) -> HexCoord {
        HexCoord::new(self.q, self.r)
    }

    /// A tournament ground is enterable only while the tile is otherwise
    /// unoccupied.
    pub fn tournament_available(&self) -> bool {
        self.has_tournament && self.building_id.is_none() && self.wild_monster_id.is_none()
    }
}
