//! Collision adapter for the built-in kinematic backend.
//!
//! The planner emits backend-agnostic `DiamondCollider` descriptors; this
//! module places them in Bevy world space and answers the point queries the
//! movement system needs. Attaching a different physics backend means
//! replacing this module, not the planner.

use bevy::prelude::*;

use super::screen_to_world;
use super::tilemap::{DiamondCollider, TilePlacement};

/// One static collider anchored at a tile's world-space center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCollider {
    pub center: Vec2,
    pub shape: DiamondCollider,
}

impl PlacedCollider {
    /// Axis-aligned reject against the enclosing rectangle, then the exact
    /// diamond test.
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.shape.enclosing / 2.0;
        let offset = point - self.center;
        offset.x.abs() <= half.x && offset.y.abs() <= half.y && self.shape.contains(offset)
    }
}

/// All blocking tiles of the current island, queryable by world position.
#[derive(Resource, Debug, Default)]
pub struct CollisionIndex {
    colliders: Vec<PlacedCollider>,
}

impl CollisionIndex {
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Record a placement's collider, if it has one.
    pub fn insert(&mut self, placement: &TilePlacement) {
        if let Some(shape) = placement.collider {
            self.colliders.push(PlacedCollider {
                center: screen_to_world(placement.screen),
                shape,
            });
        }
    }

    pub fn blocked(&self, point: Vec2) -> bool {
        self.colliders.iter().any(|c| c.contains(point))
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::TerrainId;
    use crate::world::generator::TerrainGrid;
    use crate::world::tilemap::{TileDimensions, TilemapConfig};

    /// 3x3 all-water grid planned with water blocking.
    fn water_index() -> CollisionIndex {
        let grid = TerrainGrid::from_fn(3, |_, _| TerrainId::WATER);
        let cfg = TilemapConfig::new(
            TileDimensions::default(),
            [TerrainId::WATER].into(),
            [(TerrainId::WATER, "water_0".to_string())].into(),
        )
        .unwrap();

        let mut index = CollisionIndex::default();
        for placement in cfg.placements(&grid) {
            index.insert(&placement);
        }
        index
    }

    #[test]
    fn every_water_tile_lands_in_the_index() {
        assert_eq!(water_index().len(), 9);
    }

    #[test]
    fn tile_centers_are_blocked() {
        let index = water_index();
        let cfg = TilemapConfig::new(
            TileDimensions::default(),
            [TerrainId::WATER].into(),
            [(TerrainId::WATER, "water_0".to_string())].into(),
        )
        .unwrap();
        let projection = cfg.projection(3);

        for y in 0..3 {
            for x in 0..3 {
                let center = screen_to_world(projection.project(x, y));
                assert!(index.blocked(center), "center of ({x}, {y}) not blocked");
            }
        }
    }

    #[test]
    fn points_outside_every_diamond_are_free() {
        let index = water_index();
        // Far outside the island.
        assert!(!index.blocked(Vec2::new(-500.0, 300.0)));

        // Inside tile (0, 0)'s enclosing rectangle but past its diamond
        // edge, and outside every neighbour: broad phase accepts, narrow
        // phase must still reject.
        let corner = screen_to_world(Vec2::new(68.0, -30.0));
        assert!(!index.blocked(corner));
    }

    #[test]
    fn adjacent_diamonds_tile_without_gaps() {
        let index = water_index();
        let cfg = TilemapConfig::new(
            TileDimensions::default(),
            [TerrainId::WATER].into(),
            [(TerrainId::WATER, "water_0".to_string())].into(),
        )
        .unwrap();
        let projection = cfg.projection(3);

        // Midpoint of the shared edge between (0, 0) and (1, 0) lies on
        // both diamond boundaries; it must read as blocked.
        let a = projection.project(0, 0);
        let b = projection.project(1, 0);
        let edge_mid = screen_to_world((a + b) / 2.0);
        assert!(index.blocked(edge_mid));
    }

    #[test]
    fn clearing_empties_the_index() {
        let mut index = water_index();
        assert!(!index.is_empty());
        index.clear();
        assert!(index.is_empty());
        assert!(!index.blocked(Vec2::ZERO));
    }
}
