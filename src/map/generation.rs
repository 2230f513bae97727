//! Planet generation
//!
//! Runs exactly once, when a faction is first chosen and the map is empty.
//! Everything afterwards mutates the generated tiles in place.

use rand::Rng;

use crate::core::config::config;
use crate::core::types::{Faction, Resources};
use crate::map::hex::HexCoord;
use crate::map::tile::{Biome, HexTile};
use crate::map::HexMap;

/// Generate all tiles within `radius` hex steps of the origin.
///
/// The origin is the player's landing site: a single Forest tile, explored
/// and owned. Its six neighbors start explored but unowned. The two rival
/// factions hold far bases at `(-radius, 0)` and `(radius, -radius)`,
/// unexplored from the player's perspective.
pub fn generate<R: Rng>(radius: i32, player_faction: Faction, rng: &mut R) -> HexMap {
    let cfg = config();
    let [rival1, rival2] = player_faction.rivals();

    let mut map = HexMap::new();

    for q in -radius..=radius {
        let r1 = (-radius).max(-q - radius);
        let r2 = radius.min(-q + radius);
        for r in r1..=r2 {
            let coord = HexCoord::new(q, r);
            let mut tile = HexTile::new(coord);

            // 1 biome (90%), 2 (8%), 3 (2%), sampled with replacement
            let roll: f64 = rng.gen();
            let biome_count = if roll < 0.90 {
                1
            } else if roll < 0.98 {
                2
            } else {
                3
            };
            for _ in 0..biome_count {
                tile.biomes.push(Biome::ALL[rng.gen_range(0..Biome::ALL.len())]);
            }

            if q == 0 && r == 0 {
                // Landing site: friendly start
                tile.biomes.clear();
                tile.biomes.push(Biome::Forest);
                tile.owner = Some(player_faction);
                tile.is_explored = true;
            } else if coord.distance(&HexCoord::new(0, 0)) == 1 {
                tile.is_explored = true;
            } else if q == -radius && r == 0 {
                tile.owner = Some(rival1);
            } else if q == radius && r == -radius {
                tile.owner = Some(rival2);
            }

            tile.has_tournament = rng.gen_bool(cfg.tournament_tile_chance);
            tile.resource_yield = Resources::new(
                rng.gen_range(0..5) as f64,
                rng.gen_range(0..5) as f64,
                rng.gen_range(0..5) as f64,
                rng.gen_range(0..5) as f64,
            );

            map.insert(tile.id.clone(), tile);
        }
    }

    map
}

/// A tile can be explored iff it is itself unexplored and at least one of
/// its 6 neighbors is explored.
pub fn is_explorable(map: &HexMap, hex_id: &str) -> bool {
    let Some(tile) = map.get(hex_id) else {
        return false;
    };
    if tile.is_explored {
        return false;
    }
    tile.coord()
        .neighbors()
        .iter()
        .any(|n| map.get(&n.id()).is_some_and(|t| t.is_explored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_map(radius: i32) -> HexMap {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        generate(radius, Faction::GeoForge, &mut rng)
    }

    #[test]
    fn test_tile_count() {
        // Hexagon of radius r holds 3r^2 + 3r + 1 tiles
        let map = test_map(4);
        assert_eq!(map.len(), 61);
    }

    #[test]
    fn test_origin_is_player_forest() {
        let map = test_map(4);
        let origin = &map["0,0"];
        assert_eq!(origin.owner, Some(Faction::GeoForge));
        assert!(origin.is_explored);
        assert_eq!(origin.biomes, vec![Biome::Forest]);
    }

    #[test]
    fn test_origin_neighbors_explored_but_unowned() {
        let map = test_map(4);
        for n in HexCoord::new(0, 0).neighbors() {
            let tile = &map[&n.id()];
            assert!(tile.is_explored);
            assert_eq!(tile.owner, None);
        }
    }

    #[test]
    fn test_rival_bases_owned_and_unexplored() {
        let map = test_map(4);
        let [rival1, rival2] = Faction::GeoForge.rivals();

        let base1 = &map["-4,0"];
        assert_eq!(base1.owner, Some(rival1));
        assert!(!base1.is_explored);

        let base2 = &map["4,-4"];
        assert_eq!(base2.owner, Some(rival2));
        assert!(!base2.is_explored);
    }

    #[test]
    fn test_every_tile_has_biomes() {
        let map = test_map(4);
        for tile in map.values() {
            assert!(!tile.biomes.is_empty() && tile.biomes.len() <= 3);
        }
    }

    #[test]
    fn test_explorable_requires_explored_neighbor() {
        let map = test_map(4);
        // Frontier tiles adjacent to the starting ring are explorable
        assert!(is_explorable(&map, "2,0"));
        // The rival base in the far corner is not reachable yet
        assert!(!is_explorable(&map, "-4,0"));
        // Explored tiles are never explorable
        assert!(!is_explorable(&map, "0,0"));
        // Unknown ids are not explorable
        assert!(!is_explorable(&map, "99,99"));
    }

    #[test]
    fn test_generation_is_deterministic_for_a_seed() {
        let a = test_map(3);
        let b = test_map(3);
        for (id, tile) in &a {
            let other = &b[id];
            assert_eq!(tile.biomes, other.biomes);
            assert_eq!(tile.has_tournament, other.has_tournament);
        }
    }
}
