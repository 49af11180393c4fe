//! World domain plugin for Isleholm.
//!
//! Responsible for:
//! - Generating the island terrain grid from the current seed
//! - Planning tile placements (projection + collision footprints)
//! - Spawning tile sprites and populating the collision index
//! - Regenerating the island on demand (R key)
//! - Syncing LogicalPosition → Transform with y-sort depth

pub mod collision;
pub mod generator;
pub mod iso;
pub mod tilemap;

use bevy::prelude::*;
use rand::prelude::*;

use crate::shared::*;
use collision::CollisionIndex;
use generator::{generate, GeneratorConfig, TerrainGrid};
use iso::IsoProjection;
use tilemap::{TileDimensions, TilemapConfig};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldMap>()
            .init_resource::<CollisionIndex>()
            .add_systems(OnEnter(GameState::Playing), spawn_island)
            .add_systems(
                Update,
                (request_regenerate_on_key, handle_regenerate_request)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(PostUpdate, sync_position_and_ysort);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES & COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Tracks the currently generated island and provides terrain queries.
#[derive(Resource, Debug, Default)]
pub struct WorldMap {
    grid: Option<TerrainGrid>,
    pub seed: u64,
}

impl WorldMap {
    pub fn ready(&self) -> bool {
        self.grid.is_some()
    }

    pub fn size(&self) -> usize {
        self.grid.as_ref().map_or(0, TerrainGrid::size)
    }

    /// Terrain at (x, y); open ocean when no island is loaded.
    pub fn terrain(&self, x: i32, y: i32) -> TerrainId {
        self.grid.as_ref().map_or(TerrainId::WATER, |g| g.get(x, y))
    }

    pub fn is_water(&self, x: i32, y: i32) -> bool {
        self.terrain(x, y).is_water()
    }

    pub fn grid(&self) -> Option<&TerrainGrid> {
        self.grid.as_ref()
    }
}

/// Marker component for tile sprite entities (for bulk despawn).
#[derive(Component, Debug)]
pub struct MapTile;

// ═══════════════════════════════════════════════════════════════════════
// COORDINATE SPACES
// ═══════════════════════════════════════════════════════════════════════

/// The projection every placement consumer shares this session.
pub fn projection() -> IsoProjection {
    IsoProjection::new(ISO_WIDTH, ISO_HEIGHT, ISO_SCALE, MAP_SIZE)
}

/// Planner screen space (y down) → Bevy world space (y up).
pub fn screen_to_world(screen: Vec2) -> Vec2 {
    Vec2::new(screen.x, -screen.y)
}

/// Bevy world space → planner screen space.
pub fn world_to_screen(world: Vec2) -> Vec2 {
    Vec2::new(world.x, -world.y)
}

// ═══════════════════════════════════════════════════════════════════════
// TILE COLORS (placeholder rendering until the atlas lands)
// ═══════════════════════════════════════════════════════════════════════

/// Flat placeholder color for a tileset frame key.
fn tile_color(frame: &str) -> Color {
    match frame.split('_').next().unwrap_or("") {
        "water" => Color::srgb(0.2, 0.4, 0.82),
        "stone" => Color::srgb(0.5, 0.5, 0.55),
        "terrain" => Color::srgb(0.6, 0.45, 0.3),
        "sand" => Color::srgb(0.9, 0.85, 0.6),
        "grass" => Color::srgb(0.3, 0.72, 0.32),
        "snow" => Color::srgb(0.92, 0.94, 0.97),
        // Unknown frame: loud magenta so a bad table is visible in-game.
        _ => Color::srgb(1.0, 0.0, 1.0),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ISLAND SPAWNING
// ═══════════════════════════════════════════════════════════════════════

/// Build the initial island when the game enters Playing.
fn spawn_island(
    mut commands: Commands,
    seed: Res<WorldSeed>,
    frames: Res<TileFrameRegistry>,
    mut world_map: ResMut<WorldMap>,
    mut collision: ResMut<CollisionIndex>,
) {
    build_island(&mut commands, seed.0, &frames, &mut world_map, &mut collision);
}

/// Generate, plan, and spawn one island. Configuration errors abort the
/// build loudly and leave no half-spawned map behind.
fn build_island(
    commands: &mut Commands,
    seed: u64,
    frames: &TileFrameRegistry,
    world_map: &mut WorldMap,
    collision: &mut CollisionIndex,
) {
    let config = GeneratorConfig {
        size: MAP_SIZE,
        terrain_kinds: TERRAIN_KINDS,
        seed: Some(seed),
    };
    let grid = match generate(&config) {
        Ok(grid) => grid,
        Err(err) => {
            error!("[World] island generation rejected: {err}");
            return;
        }
    };

    let tilemap = match TilemapConfig::new(
        TileDimensions::default(),
        [TerrainId::WATER].into(),
        frames.frames.clone(),
    ) {
        Ok(tilemap) => tilemap,
        Err(err) => {
            error!("[World] tilemap config rejected: {err}");
            return;
        }
    };

    collision.clear();
    let mut tiles = 0usize;
    for placement in tilemap.placements(&grid) {
        collision.insert(&placement);

        let world_pos = screen_to_world(placement.screen);
        commands.spawn((
            MapTile,
            // Placeholder sprite — a flat diamond-bounds rectangle.
            Sprite {
                color: tile_color(placement.frame),
                custom_size: Some(Vec2::new(ISO_WIDTH * ISO_SCALE, ISO_HEIGHT * ISO_SCALE)),
                ..default()
            },
            Transform::from_translation(
                world_pos.extend(Z_TILE_BASE - world_pos.y * Z_Y_SORT_SCALE),
            ),
        ));
        tiles += 1;
    }

    world_map.seed = seed;
    world_map.grid = Some(grid);

    info!(
        "[World] island ready: seed={seed}, {tiles} tiles, {} water bodies",
        collision.len()
    );
}

// ═══════════════════════════════════════════════════════════════════════
// REGENERATION
// ═══════════════════════════════════════════════════════════════════════

/// R rerolls the island.
fn request_regenerate_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut writer: EventWriter<RegenerateMapEvent>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        writer.send(RegenerateMapEvent { seed: None });
    }
}

/// Despawn the current island (player included) and build a fresh one. The
/// player plugin respawns the player on the new island next frame.
fn handle_regenerate_request(
    mut commands: Commands,
    mut events: EventReader<RegenerateMapEvent>,
    tile_query: Query<Entity, With<MapTile>>,
    player_query: Query<Entity, With<Player>>,
    frames: Res<TileFrameRegistry>,
    mut world_map: ResMut<WorldMap>,
    mut collision: ResMut<CollisionIndex>,
    mut seed_res: ResMut<WorldSeed>,
) {
    // Collapse a burst of requests into one rebuild.
    let Some(event) = events.read().last() else {
        return;
    };

    let seed = event.seed.unwrap_or_else(|| thread_rng().gen());
    info!("[World] regenerating island with seed {seed}");

    for entity in tile_query.iter().chain(player_query.iter()) {
        commands.entity(entity).despawn();
    }

    seed_res.0 = seed;
    build_island(&mut commands, seed, &frames, &mut world_map, &mut collision);
}

// ═══════════════════════════════════════════════════════════════════════
// POSITION SYNC
// ═══════════════════════════════════════════════════════════════════════

/// Syncs LogicalPosition → Transform with pixel rounding and Y-sort Z.
/// Runs in PostUpdate AFTER all movement systems.
pub fn sync_position_and_ysort(
    mut with_ysort: Query<(&LogicalPosition, &mut Transform), With<YSorted>>,
    mut without_ysort: Query<(&LogicalPosition, &mut Transform), Without<YSorted>>,
) {
    for (logical_pos, mut transform) in &mut with_ysort {
        transform.translation.x = logical_pos.0.x.round();
        transform.translation.y = logical_pos.0.y.round();
        transform.translation.z = Z_ENTITY_BASE - logical_pos.0.y * Z_Y_SORT_SCALE;
    }

    for (logical_pos, mut transform) in &mut without_ysort {
        transform.translation.x = logical_pos.0.x.round();
        transform.translation.y = logical_pos.0.y.round();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_world_map_is_all_ocean() {
        let map = WorldMap::default();
        assert!(!map.ready());
        assert_eq!(map.size(), 0);
        assert!(map.is_water(0, 0));
        assert!(map.is_water(10, 10));
    }

    #[test]
    fn screen_world_round_trip() {
        let p = Vec2::new(256.0, 96.0);
        assert_eq!(world_to_screen(screen_to_world(p)), p);
        assert_eq!(screen_to_world(p), Vec2::new(256.0, -96.0));
    }

    #[test]
    fn known_frames_get_distinct_colors() {
        let frames = ["water_0", "stone_0", "terrain_0", "sand_0", "grass_0", "snow_0"];
        let colors: Vec<_> = frames.iter().map(|f| tile_color(f)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        // Unknown frames stand out instead of blending in.
        assert_eq!(tile_color("mystery_3"), Color::srgb(1.0, 0.0, 1.0));
    }
}
