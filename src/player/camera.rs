//! Follow camera.

use bevy::prelude::*;

use crate::shared::*;
use crate::world::projection;

/// Smoothly follow the player with the camera using a lerp, clamped to the
/// projected island bounds. Snaps instantly when the target jumps far (a
/// respawn after regeneration reads as a teleport).
pub fn camera_follow_player(
    time: Res<Time>,
    player_query: Query<&LogicalPosition, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<
        (&mut Transform, &OrthographicProjection),
        (With<Camera2d>, Without<Player>),
    >,
) {
    let Ok(logical_pos) = player_query.get_single() else {
        return;
    };
    let Ok((mut cam_tf, ortho)) = camera_query.get_single_mut() else {
        return;
    };

    let target_x = logical_pos.0.x.round();
    let target_y = logical_pos.0.y.round();

    let dx = (target_x - cam_tf.translation.x).abs();
    let dy = (target_y - cam_tf.translation.y).abs();
    let should_snap = dx > ISO_WIDTH * 4.0 || dy > ISO_HEIGHT * 4.0;

    let (smooth_x, smooth_y) = if should_snap {
        (target_x, target_y)
    } else {
        let lerp_speed = 5.0;
        let t = (lerp_speed * time.delta_secs()).min(1.0);
        (
            cam_tf.translation.x + (target_x - cam_tf.translation.x) * t,
            cam_tf.translation.y + (target_y - cam_tf.translation.y) * t,
        )
    };

    // Clamp to the projected island so the viewport never drifts into the
    // void. World y is the negated projection y, hence the flipped range.
    let bounds = projection().map_pixel_bounds();

    let half_vw = ortho.area.width() / 2.0 * cam_tf.scale.x;
    let half_vh = ortho.area.height() / 2.0 * cam_tf.scale.y;

    let min_x = half_vw.min(bounds.x / 2.0);
    let max_x = (bounds.x - half_vw).max(min_x);
    let min_y = (-bounds.y + half_vh).min(-bounds.y / 2.0);
    let max_y = (-half_vh).max(min_y);

    cam_tf.translation.x = smooth_x.round().clamp(min_x, max_x);
    cam_tf.translation.y = smooth_y.round().clamp(min_y, max_y);
}
