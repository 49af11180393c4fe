//! Shared components, resources, events, and states for Isleholm.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// TERRAIN
// ═══════════════════════════════════════════════════════════════════════

/// Identifier for one terrain kind.
///
/// Water is always id 0; land kinds occupy `1..terrain_kinds`. The
/// cardinality is configuration rather than an enum so a map can be
/// generated against any tileset size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerrainId(pub u8);

impl TerrainId {
    pub const WATER: TerrainId = TerrainId(0);

    pub fn is_water(self) -> bool {
        self == Self::WATER
    }
}

/// Terrain id → frame name inside the packed tileset atlas.
///
/// Populated by the data domain during Loading. A terrain id without an
/// entry simply produces no tile; a sparse table is a valid configuration
/// while art is still landing.
#[derive(Resource, Debug, Clone, Default)]
pub struct TileFrameRegistry {
    pub frames: HashMap<TerrainId, String>,
}

impl TileFrameRegistry {
    pub fn get(&self, id: TerrainId) -> Option<&str> {
        self.frames.get(&id).map(String::as_str)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

/// Direction the player last walked. The four directions follow the iso
/// diamond's diagonals, not the grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Which animation the player sprite should be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AnimKey {
    #[default]
    Stand,
    WalkUp,
    WalkDown,
    WalkLeft,
    WalkRight,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub anim: AnimKey,
    pub is_moving: bool,
    pub speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            anim: AnimKey::Stand,
            is_moving: false,
            speed: PLAYER_SPEED,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// POSITIONING
// ═══════════════════════════════════════════════════════════════════════

/// Grid coordinates of the tile an entity currently occupies.
#[derive(Component, Debug, Clone, Copy)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Sub-pixel world position. `Transform` is synced from this every frame
/// with pixel rounding (and y-sort depth for `YSorted` entities).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LogicalPosition(pub Vec2);

/// Marker for entities whose draw depth follows their vertical position.
#[derive(Component, Debug, Clone, Copy)]
pub struct YSorted;

// ═══════════════════════════════════════════════════════════════════════
// WORLD SEED
// ═══════════════════════════════════════════════════════════════════════

/// Seed of the current island. Loaded from the last session where possible
/// so the same island greets the player on relaunch.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSeed(pub u64);

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Tear the island down and build a new one. `seed: None` rolls a fresh
/// random layout.
#[derive(Event, Debug, Clone)]
pub struct RegenerateMapEvent {
    pub seed: Option<u64>,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

/// Tiles per side of the island.
pub const MAP_SIZE: usize = 20;
/// Water plus five land kinds (stone, terrain, sand, grass, snow).
pub const TERRAIN_KINDS: u8 = 6;

// Logical diamond dimensions used by the projection.
pub const ISO_WIDTH: f32 = 128.0;
pub const ISO_HEIGHT: f32 = 64.0;
pub const ISO_SCALE: f32 = 1.0;

// Real pixel dimensions of the tile assets. Taller than the logical
// diamond: the art carries a thickness skirt below the walkable face.
pub const TEX_WIDTH: f32 = 128.0;
pub const TEX_HEIGHT: f32 = 147.0;
pub const TEX_SCALE: f32 = 1.0;

pub const PLAYER_SPEED: f32 = 240.0;

pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

// Draw layers. Tiles get a static depth at spawn; moving entities are
// re-sorted every frame from their LogicalPosition.
pub const Z_TILE_BASE: f32 = 0.0;
pub const Z_ENTITY_BASE: f32 = 10.0;
pub const Z_Y_SORT_SCALE: f32 = 0.001;
