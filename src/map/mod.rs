//! Hex map - coordinates, tiles, and planet generation

pub mod generation;
pub mod hex;
pub mod tile;

pub use generation::{generate, is_explorable};
pub use hex::HexCoord;
pub use tile::{Biome, HexTile};

use std::collections::HashMap;

/// The planet map, keyed by tile id `"q,r"`. Generated once at game start
/// and mutated in place afterwards.
pub type HexMap = HashMap<String, HexTile>;
