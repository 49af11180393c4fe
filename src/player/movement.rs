//! Keyboard-driven isometric movement.
//!
//! The input → (velocity, animation) mapping is a pure function so it can
//! be tested without an app; the system around it only does I/O: reading
//! keys, applying the intent against the collision index, and keeping the
//! movement state in sync.

use bevy::prelude::*;

use super::world_to_grid;
use crate::shared::*;
use crate::world::collision::CollisionIndex;

/// Pressed state of the four movement keys for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// What the player should do this frame: a world-space velocity plus the
/// animation to show. `facing: None` means keep whatever it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkIntent {
    pub velocity: Vec2,
    pub facing: Option<Facing>,
    pub anim: AnimKey,
}

impl WalkIntent {
    fn standing() -> Self {
        Self {
            velocity: Vec2::ZERO,
            facing: None,
            anim: AnimKey::Stand,
        }
    }
}

/// Map held keys to an isometric walk.
///
/// Each key moves the player along one diagonal of the tile diamond, so the
/// horizontal component is `speed` and the vertical one `speed / 2` (the
/// 2:1 diamond ratio). Priority is left > right > up > down, a single
/// else-if chain; simultaneous keys never combine.
pub fn walk_intent(input: WalkInput, speed: f32) -> WalkIntent {
    if input.left {
        WalkIntent {
            velocity: Vec2::new(-speed, -speed / 2.0),
            facing: Some(Facing::Left),
            anim: AnimKey::WalkLeft,
        }
    } else if input.right {
        WalkIntent {
            velocity: Vec2::new(speed, speed / 2.0),
            facing: Some(Facing::Right),
            anim: AnimKey::WalkRight,
        }
    } else if input.up {
        WalkIntent {
            velocity: Vec2::new(-speed, speed / 2.0),
            facing: Some(Facing::Up),
            anim: AnimKey::WalkUp,
        }
    } else if input.down {
        WalkIntent {
            velocity: Vec2::new(speed, -speed / 2.0),
            facing: Some(Facing::Down),
            anim: AnimKey::WalkDown,
        }
    } else {
        WalkIntent::standing()
    }
}

/// Core movement system — reads WASD / arrow keys, applies the walk intent
/// with axis-separated collision against the water diamonds (so the player
/// slides along shorelines), and keeps facing, animation, and grid position
/// in sync.
pub fn player_movement(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    collision: Res<CollisionIndex>,
    mut query: Query<(&mut LogicalPosition, &mut PlayerMovement, &mut GridPosition), With<Player>>,
) {
    let Ok((mut pos, mut movement, mut grid_pos)) = query.get_single_mut() else {
        return;
    };

    let input = WalkInput {
        left: keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft),
        right: keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight),
        up: keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp),
        down: keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown),
    };
    let intent = walk_intent(input, movement.speed);

    movement.is_moving = intent.velocity != Vec2::ZERO;
    movement.anim = intent.anim;
    if let Some(facing) = intent.facing {
        movement.facing = facing;
    }

    if !movement.is_moving {
        return;
    }

    let delta = intent.velocity * time.delta_secs();

    let candidate_x = Vec2::new(pos.0.x + delta.x, pos.0.y);
    if !collision.blocked(candidate_x) {
        pos.0.x = candidate_x.x;
    }
    let candidate_y = Vec2::new(pos.0.x, pos.0.y + delta.y);
    if !collision.blocked(candidate_y) {
        pos.0.y = candidate_y.y;
    }

    let (gx, gy) = world_to_grid(pos.0);
    grid_pos.x = gx;
    grid_pos.y = gy;
}

/// Placeholder animation: mirror the sprite for left-ish directions and
/// brighten it while walking. Real atlas playback is the engine side of
/// this seam.
pub fn animate_player_sprite(mut query: Query<(&PlayerMovement, &mut Sprite), With<Player>>) {
    let Ok((movement, mut sprite)) = query.get_single_mut() else {
        return;
    };

    sprite.flip_x = matches!(movement.facing, Facing::Left | Facing::Up);
    sprite.color = if movement.is_moving {
        Color::srgb(0.3, 0.6, 0.9)
    } else {
        Color::srgb(0.2, 0.5, 0.8)
    };
}
