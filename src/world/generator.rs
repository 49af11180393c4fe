//! Procedural island generation.
//!
//! The island is a square grid of terrain ids: a ring of water all the way
//! around, uniformly random land kinds in the interior, and a handful of
//! carved lakes. Generation is seedable: re-entering the same seed yields
//! the same island.

use rand::prelude::*;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::shared::TerrainId;

/// Rejected generation parameters. Raised before any cell is written, so a
/// caller can never observe a partially built grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("map size must be at least 1, got {0}")]
    SizeTooSmall(usize),
    #[error("terrain_kinds must be at least 2 (water plus one land kind), got {0}")]
    TooFewTerrainKinds(u8),
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Tiles per side.
    pub size: usize,
    /// Number of terrain ids, water included.
    pub terrain_kinds: u8,
    /// Fixed seed for a reproducible layout; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: crate::shared::MAP_SIZE,
            terrain_kinds: crate::shared::TERRAIN_KINDS,
            seed: None,
        }
    }
}

/// Row-major square grid of terrain ids. Write-once: fully populated by
/// [`generate`] and read-only for the rest of the island's life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    size: usize,
    cells: Vec<TerrainId>,
}

impl TerrainGrid {
    fn filled(size: usize, id: TerrainId) -> Self {
        Self {
            size,
            cells: vec![id; size * size],
        }
    }

    /// Build a grid cell-by-cell. Entry point for handcrafted maps and
    /// tests; generated maps come from [`generate`].
    pub fn from_fn(size: usize, mut cell: impl FnMut(usize, usize) -> TerrainId) -> Self {
        let mut grid = Self::filled(size, TerrainId::WATER);
        for y in 0..size {
            for x in 0..size {
                grid.cells[y * size + x] = cell(x, y);
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Terrain at (x, y). Everything beyond the grid is open ocean.
    pub fn get(&self, x: i32, y: i32) -> TerrainId {
        if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
            TerrainId::WATER
        } else {
            self.cells[y as usize * self.size + x as usize]
        }
    }

    pub fn is_water(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_water()
    }

    /// Row-major iteration over all cells.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TerrainId)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, id)| (i % size, i / size, *id))
    }

    /// Write a cell, skipping anything outside the strict interior. Lake
    /// carving is allowed to run past its bounds; those writes just vanish.
    fn set_interior(&mut self, x: i32, y: i32, id: TerrainId) {
        if x > 0 && y > 0 && x < self.size as i32 - 1 && y < self.size as i32 - 1 {
            self.cells[y as usize * self.size + x as usize] = id;
        }
    }
}

/// Generate an island from the given config.
pub fn generate(config: &GeneratorConfig) -> Result<TerrainGrid, GeneratorError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with_rng(config.size, config.terrain_kinds, &mut rng)
}

/// Generate an island with a caller-supplied RNG.
pub fn generate_with_rng(
    size: usize,
    terrain_kinds: u8,
    rng: &mut impl Rng,
) -> Result<TerrainGrid, GeneratorError> {
    if size < 1 {
        return Err(GeneratorError::SizeTooSmall(size));
    }
    if terrain_kinds < 2 {
        return Err(GeneratorError::TooFewTerrainKinds(terrain_kinds));
    }

    // Base fill: water ring, random land inside.
    let mut grid = TerrainGrid::filled(size, TerrainId::WATER);
    for y in 1..size.saturating_sub(1) {
        for x in 1..size.saturating_sub(1) {
            grid.cells[y * size + x] = TerrainId(rng.gen_range(1..terrain_kinds));
        }
    }

    // Carve lakes. Centers stay two tiles off the border, so only the
    // one-tile lookback on the top/left edge needs the interior guard.
    let lake_count = size / 5;
    for _ in 0..lake_count {
        let cx = rng.gen_range(2..=size - 3) as i32;
        let cy = rng.gen_range(2..=size - 3) as i32;
        let lake_size = rng.gen_range(2..=4) as i32;

        for y in (cy - 1)..(cy + lake_size) {
            for x in (cx - 1)..(cx + lake_size) {
                grid.set_interior(x, y, TerrainId::WATER);
            }
        }
    }

    Ok(grid)
}
