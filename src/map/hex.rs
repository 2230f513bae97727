//! Axial hex coordinates (q, r system)

use serde::{Deserialize, Serialize};

/// Axial hex coordinate with derived `s = -q - r`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32, // Column
    pub r: i32, // Row
}

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube axis, always `-q - r`
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Get all 6 adjacent hexes, in the fixed offset order
    /// `(+1,-1),(+1,0),(0,+1),(-1,+1),(-1,0),(0,-1)`.
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q + 1, self.r - 1),
            HexCoord::new(self.q + 1, self.r),
            HexCoord::new(self.q, self.r + 1),
            HexCoord::new(self.q - 1, self.r + 1),
            HexCoord::new(self.q - 1, self.r),
            HexCoord::new(self.q, self.r - 1),
        ]
    }

    /// Distance in hex steps using the axial coordinate formula
    pub fn distance(&self, other: &HexCoord) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        (dq + dr + ds) / 2
    }

    /// Tile id used as the map key
    pub fn id(&self) -> String {
        format!("{},{}", self.q, self.r)
    }

    /// Parse a tile id back into a coordinate
    pub fn parse(id: &str) -> Option<HexCoord> {
        let (q, r) = id.split_once(',')?;
        Some(HexCoord::new(
            q.trim().parse().ok()?,
            r.trim().parse().ok()?,
        ))
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_coord_distance() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(2, 1);
        assert_eq!(a.distance(&b), 3);

        let c = HexCoord::new(0, 0);
        let d = HexCoord::new(0, 3);
        assert_eq!(c.distance(&d), 3);
    }

    #[test]
    fn test_hex_neighbors() {
        let center = HexCoord::new(0, 0);
        let neighbors = center.neighbors();
        assert_eq!(neighbors.len(), 6);

        // All neighbors should be distance 1 away
        for n in neighbors {
            assert_eq!(center.distance(&n), 1);
        }
    }

    #[test]
    fn test_neighbor_offset_order() {
        let n = HexCoord::new(2, -1).neighbors();
        assert_eq!(n[0], HexCoord::new(3, -2));
        assert_eq!(n[1], HexCoord::new(3, -1));
        assert_eq!(n[2], HexCoord::new(2, 0));
        assert_eq!(n[3], HexCoord::new(1, 0));
        assert_eq!(n[4], HexCoord::new(1, -1));
        assert_eq!(n[5], HexCoord::new(2, -2));
    }

    #[test]
    fn test_cube_invariant() {
        let c = HexCoord::new(3, -5);
        assert_eq!(c.q + c.r + c.s(), 0);
    }

    #[test]
    fn test_id_roundtrip() {
        let c = HexCoord::new(-4, 2);
        assert_eq!(c.id(), "-4,2");
        assert_eq!(HexCoord::parse("-4,2"), Some(c));
        assert_eq!(HexCoord::parse("nope"), None);
    }
}
