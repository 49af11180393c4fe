//! Player domain plugin for Isleholm.
//!
//! Spawning on a valid land tile, iso-diagonal keyboard movement with
//! water collision, placeholder sprite animation, and the follow camera.

mod camera;
mod movement;
mod spawn;

pub use movement::{walk_intent, WalkInput, WalkIntent};

use bevy::prelude::*;

use crate::shared::*;
use crate::world::{projection, world_to_screen};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                // Spawn is guarded; it only acts when the island exists and
                // no player does (initial entry and after regeneration).
                spawn::spawn_player,
                movement::player_movement,
                movement::animate_player_sprite.after(movement::player_movement),
                camera::camera_follow_player.after(movement::player_movement),
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Grid cell under a world-space position.
pub fn world_to_grid(world: Vec2) -> (i32, i32) {
    projection().unproject(world_to_screen(world))
}
