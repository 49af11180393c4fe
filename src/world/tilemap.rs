//! Tile placement planning.
//!
//! A pure transform from (terrain grid, tilemap config) to one placement per
//! drawable cell: projected screen position, atlas frame key, and for
//! blocking terrain a backend-agnostic collision footprint. The planner
//! knows nothing about the engine; the world plugin turns placements into
//! sprite entities and hands collider descriptors to the collision adapter.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use thiserror::Error;

use super::generator::TerrainGrid;
use super::iso::IsoProjection;
use crate::shared::TerrainId;

/// Rejected tilemap parameters, raised at construction so no planner with
/// broken dimensions can ever be asked for placements.
#[derive(Debug, Error, PartialEq)]
pub enum TilemapError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },
    #[error("tile frame table is empty")]
    EmptyFrameTable,
}

/// Logical diamond dimensions (projection) and real asset dimensions
/// (collision extent). The two may legitimately differ; the art is taller
/// than the walkable diamond face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDimensions {
    pub iso_width: f32,
    pub iso_height: f32,
    pub iso_scale: f32,
    pub tex_width: f32,
    pub tex_height: f32,
    pub tex_scale: f32,
}

impl Default for TileDimensions {
    fn default() -> Self {
        use crate::shared::*;
        Self {
            iso_width: ISO_WIDTH,
            iso_height: ISO_HEIGHT,
            iso_scale: ISO_SCALE,
            tex_width: TEX_WIDTH,
            tex_height: TEX_HEIGHT,
            tex_scale: TEX_SCALE,
        }
    }
}

/// The visible diamond silhouette of one blocking tile, relative to the
/// tile's projected center, plus the enclosing rectangle of the real asset
/// for backends that want an axis-aligned proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondCollider {
    pub vertices: [Vec2; 4],
    pub enclosing: Vec2,
}

impl DiamondCollider {
    /// Tile silhouette: top, right, bottom, left.
    const VERTICES: [Vec2; 4] = [
        Vec2::new(0.0, -32.0),
        Vec2::new(64.0, 0.0),
        Vec2::new(0.0, 32.0),
        Vec2::new(-64.0, 0.0),
    ];

    fn new(enclosing: Vec2) -> Self {
        Self {
            vertices: Self::VERTICES,
            enclosing,
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.vertices[1].x, self.vertices[2].y)
    }

    /// Diamond membership for a point relative to the tile center.
    pub fn contains(&self, offset: Vec2) -> bool {
        let he = self.half_extents();
        offset.x.abs() / he.x + offset.y.abs() / he.y <= 1.0
    }
}

/// Where and how a single grid cell should be rendered and collided.
///
/// Placements are computed on demand and consumed immediately; the grid
/// stays the source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement<'a> {
    pub x: i32,
    pub y: i32,
    pub terrain: TerrainId,
    /// Projection-space position, y growing downward.
    pub screen: Vec2,
    pub frame: &'a str,
    pub collider: Option<DiamondCollider>,
}

impl TilePlacement<'_> {
    /// Whether a moving entity can traverse this tile.
    pub fn is_blocking(&self) -> bool {
        self.collider.is_some()
    }
}

/// Validated planning parameters: dimensions, the blocking terrain set, and
/// the terrain → frame table.
#[derive(Debug, Clone)]
pub struct TilemapConfig {
    dimensions: TileDimensions,
    blocking: HashSet<TerrainId>,
    frames: HashMap<TerrainId, String>,
}

impl TilemapConfig {
    pub fn new(
        dimensions: TileDimensions,
        blocking: HashSet<TerrainId>,
        frames: HashMap<TerrainId, String>,
    ) -> Result<Self, TilemapError> {
        let checked = [
            ("iso_width", dimensions.iso_width),
            ("iso_height", dimensions.iso_height),
            ("iso_scale", dimensions.iso_scale),
            ("tex_width", dimensions.tex_width),
            ("tex_height", dimensions.tex_height),
            ("tex_scale", dimensions.tex_scale),
        ];
        for (name, value) in checked {
            if value <= 0.0 {
                return Err(TilemapError::NonPositiveDimension { name, value });
            }
        }
        if frames.is_empty() {
            return Err(TilemapError::EmptyFrameTable);
        }

        Ok(Self {
            dimensions,
            blocking,
            frames,
        })
    }

    pub fn dimensions(&self) -> TileDimensions {
        self.dimensions
    }

    pub fn is_blocking(&self, id: TerrainId) -> bool {
        self.blocking.contains(&id)
    }

    pub fn frame(&self, id: TerrainId) -> Option<&str> {
        self.frames.get(&id).map(String::as_str)
    }

    /// The projection this config induces for a given map.
    pub fn projection(&self, map_size: usize) -> IsoProjection {
        IsoProjection::new(
            self.dimensions.iso_width,
            self.dimensions.iso_height,
            self.dimensions.iso_scale,
            map_size,
        )
    }

    fn enclosing(&self) -> Vec2 {
        Vec2::new(
            self.dimensions.tex_width * self.dimensions.tex_scale,
            self.dimensions.tex_height * self.dimensions.tex_scale,
        )
    }

    /// Plan every drawable cell of the grid, row-major (y outer, x inner) so
    /// the consumer can depth-sort by emission order.
    ///
    /// Lazy and restartable; calling it again with the same grid yields the
    /// identical sequence. Cells whose terrain has no frame entry are
    /// skipped silently.
    pub fn placements<'a>(
        &'a self,
        grid: &'a TerrainGrid,
    ) -> impl Iterator<Item = TilePlacement<'a>> + 'a {
        let projection = self.projection(grid.size());
        let size = grid.size() as i32;

        (0..size)
            .flat_map(move |y| (0..size).map(move |x| (x, y)))
            .filter_map(move |(x, y)| {
                let terrain = grid.get(x, y);
                let frame = self.frame(terrain)?;
                let collider = self
                    .is_blocking(terrain)
                    .then(|| DiamondCollider::new(self.enclosing()));
                Some(TilePlacement {
                    x,
                    y,
                    terrain,
                    screen: projection.project(x, y),
                    frame,
                    collider,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_frames(kinds: u8) -> HashMap<TerrainId, String> {
        (0..kinds)
            .map(|id| (TerrainId(id), format!("kind_{id}")))
            .collect()
    }

    fn config(blocking: &[u8], frames: HashMap<TerrainId, String>) -> TilemapConfig {
        TilemapConfig::new(
            TileDimensions::default(),
            blocking.iter().map(|&id| TerrainId(id)).collect(),
            frames,
        )
        .unwrap()
    }

    /// A 4x4 grid with a single land cell at (2, 1).
    fn one_land_grid() -> TerrainGrid {
        TerrainGrid::from_fn(4, |x, y| {
            if (x, y) == (2, 1) {
                TerrainId(1)
            } else {
                TerrainId::WATER
            }
        })
    }

    #[test]
    fn planning_is_deterministic() {
        let grid = one_land_grid();
        let cfg = config(&[0], full_frames(2));
        let first: Vec<_> = cfg.placements(&grid).collect();
        let second: Vec<_> = cfg.placements(&grid).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn single_cell_lands_on_the_closed_form_position() {
        let grid = one_land_grid();
        // Only land is mapped, so exactly one placement comes out.
        let cfg = config(&[], [(TerrainId(1), "stone_0".to_string())].into());
        let placements: Vec<_> = cfg.placements(&grid).collect();

        assert_eq!(placements.len(), 1);
        let p = &placements[0];
        assert_eq!((p.x, p.y), (2, 1));
        // (x-y)*64 + 3*64 = 256, (x+y)*32 = 96.
        assert_eq!(p.screen, Vec2::new(256.0, 96.0));
        assert_eq!(p.frame, "stone_0");
        assert!(p.collider.is_none());
    }

    #[test]
    fn exactly_the_water_cells_carry_colliders() {
        let grid = one_land_grid();
        let cfg = config(&[0], full_frames(2));
        for p in cfg.placements(&grid) {
            if p.terrain.is_water() {
                assert!(p.collider.is_some(), "water at ({}, {}) has no collider", p.x, p.y);
            } else {
                assert!(p.collider.is_none(), "land at ({}, {}) has a collider", p.x, p.y);
            }
            assert_eq!(p.is_blocking(), p.terrain.is_water());
        }
    }

    #[test]
    fn unmapped_terrain_is_skipped() {
        let grid = one_land_grid();
        // No entry for water: only the single land cell is placed.
        let cfg = config(&[], [(TerrainId(1), "stone_0".to_string())].into());
        assert_eq!(cfg.placements(&grid).count(), 1);

        // No entry for land either way: the sequence is empty.
        let cfg = config(&[0], [(TerrainId(9), "unused".to_string())].into());
        assert_eq!(cfg.placements(&grid).count(), 0);
    }

    #[test]
    fn placements_come_out_row_major() {
        let grid = TerrainGrid::from_fn(3, |_, _| TerrainId(1));
        let cfg = config(&[], full_frames(2));
        let order: Vec<_> = cfg.placements(&grid).map(|p| (p.x, p.y)).collect();
        let expected: Vec<_> = (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn collider_shape_matches_the_tile_silhouette() {
        let grid = one_land_grid();
        let cfg = config(&[0], full_frames(2));
        let collider = cfg
            .placements(&grid)
            .find_map(|p| p.collider)
            .expect("water tile with collider");

        assert_eq!(
            collider.vertices,
            [
                Vec2::new(0.0, -32.0),
                Vec2::new(64.0, 0.0),
                Vec2::new(0.0, 32.0),
                Vec2::new(-64.0, 0.0),
            ]
        );
        // Enclosing rect tracks the asset, not the diamond.
        assert_eq!(collider.enclosing, Vec2::new(128.0, 147.0));

        assert!(collider.contains(Vec2::ZERO));
        assert!(collider.contains(Vec2::new(32.0, 16.0)));
        assert!(!collider.contains(Vec2::new(48.0, 24.0)));
        assert!(!collider.contains(Vec2::new(64.1, 0.0)));
    }

    #[test]
    fn bad_dimensions_are_rejected_eagerly() {
        let dims = TileDimensions {
            iso_width: 0.0,
            ..TileDimensions::default()
        };
        assert_eq!(
            TilemapConfig::new(dims, HashSet::new(), full_frames(2)).unwrap_err(),
            TilemapError::NonPositiveDimension { name: "iso_width", value: 0.0 }
        );

        let dims = TileDimensions {
            tex_scale: -1.0,
            ..TileDimensions::default()
        };
        assert!(TilemapConfig::new(dims, HashSet::new(), full_frames(2)).is_err());
    }

    #[test]
    fn empty_frame_table_is_rejected_eagerly() {
        assert_eq!(
            TilemapConfig::new(TileDimensions::default(), HashSet::new(), HashMap::new())
                .unwrap_err(),
            TilemapError::EmptyFrameTable
        );
    }
}
