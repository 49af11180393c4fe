//! Player spawning.

use bevy::prelude::*;
use rand::prelude::*;

use crate::shared::*;
use crate::world::{projection, screen_to_world, WorldMap};

/// Spawn the player on a random land tile once the island exists.
///
/// Rejection sampling: draw cells until one isn't water. Water only covers
/// the border ring and the carved lakes, so the loop terminates almost
/// immediately in practice.
pub fn spawn_player(
    mut commands: Commands,
    world_map: Res<WorldMap>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: wait for the island, and never double-spawn.
    if !existing.is_empty() || !world_map.ready() {
        return;
    }

    let size = world_map.size() as i32;
    let mut rng = thread_rng();
    let (gx, gy) = loop {
        let x = rng.gen_range(0..size);
        let y = rng.gen_range(0..size);
        if !world_map.is_water(x, y) {
            break (x, y);
        }
    };

    let world_pos = screen_to_world(projection().project(gx, gy));

    commands.spawn((
        // Tag
        Player,
        // Movement state
        PlayerMovement::default(),
        // Grid position for tile-based lookups
        GridPosition::new(gx, gy),
        // Sub-pixel position; Transform is synced from this with y-sort
        LogicalPosition(world_pos),
        YSorted,
        // Placeholder sprite — a blue rectangle sized like the body box
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(Vec2::new(32.0, 48.0)),
            ..default()
        },
        Transform::from_translation(world_pos.extend(Z_ENTITY_BASE)),
        Visibility::default(),
    ));

    info!("[Player] spawned on land tile ({gx}, {gy})");
}
