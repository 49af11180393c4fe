//! Isometric diamond projection.
//!
//! Pure math over grid coordinates: the classic two-axis diamond transform,
//! recentered so every projected x is non-negative. Screen y grows downward
//! here; the spawn adapter flips into Bevy's y-up world space.
//!
//! Camera bounds and the player start position are derived from the same
//! struct, so tiles, camera, and spawn can never disagree about where the
//! island is.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsoProjection {
    half_w: f32,
    half_h: f32,
    offset_x: f32,
    size: usize,
}

impl IsoProjection {
    pub fn new(iso_width: f32, iso_height: f32, iso_scale: f32, size: usize) -> Self {
        let half_w = iso_width * iso_scale / 2.0;
        let half_h = iso_height * iso_scale / 2.0;
        Self {
            half_w,
            half_h,
            offset_x: size.saturating_sub(1) as f32 * half_w,
            size,
        }
    }

    /// Screen position of the center of cell (x, y):
    /// `((x - y) * half_w + offset_x, (x + y) * half_h)`.
    pub fn project(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(
            (x - y) as f32 * self.half_w + self.offset_x,
            (x + y) as f32 * self.half_h,
        )
    }

    /// The cell whose diamond contains the given screen point.
    pub fn unproject(&self, screen: Vec2) -> (i32, i32) {
        let u = (screen.x - self.offset_x) / self.half_w;
        let v = screen.y / self.half_h;
        (
            ((u + v) / 2.0).round() as i32,
            ((v - u) / 2.0).round() as i32,
        )
    }

    /// Pixel extent of the projected map, measured between the outermost
    /// tile centers: `(2*(size-1)*half_w, 2*(size-1)*half_h)`.
    pub fn map_pixel_bounds(&self) -> Vec2 {
        let span = 2.0 * self.size.saturating_sub(1) as f32;
        Vec2::new(span * self.half_w, span * self.half_h)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_w, self.half_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_the_documented_example() {
        // 128x64 diamond at scale 1 on a 3x3 map: cell (2, 0) lands at
        // (2-0)*64 + (3-1)*64 = 256, (2+0)*32 = 64.
        let proj = IsoProjection::new(128.0, 64.0, 1.0, 3);
        assert_eq!(proj.project(2, 0), Vec2::new(256.0, 64.0));
    }

    #[test]
    fn every_projected_x_is_non_negative() {
        let proj = IsoProjection::new(128.0, 64.0, 1.0, 20);
        for y in 0..20 {
            for x in 0..20 {
                let p = proj.project(x, y);
                assert!(p.x >= 0.0, "({x}, {y}) projected to {p:?}");
                assert!(p.y >= 0.0, "({x}, {y}) projected to {p:?}");
            }
        }
        // The leftmost cell sits exactly at x = 0.
        assert_eq!(proj.project(0, 19).x, 0.0);
    }

    #[test]
    fn unproject_inverts_project_on_every_cell() {
        let proj = IsoProjection::new(128.0, 64.0, 2.0, 7);
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(proj.unproject(proj.project(x, y)), (x, y));
            }
        }
    }

    #[test]
    fn unproject_snaps_points_near_a_center() {
        let proj = IsoProjection::new(128.0, 64.0, 1.0, 5);
        let center = proj.project(2, 3);
        assert_eq!(proj.unproject(center + Vec2::new(10.0, -5.0)), (2, 3));
    }

    #[test]
    fn bounds_cover_the_projected_span() {
        let proj = IsoProjection::new(128.0, 64.0, 1.0, 20);
        assert_eq!(proj.map_pixel_bounds(), Vec2::new(2432.0, 1216.0));

        // The extreme tile centers sit exactly on the bounds.
        assert_eq!(proj.project(19, 0).x, 2432.0);
        assert_eq!(proj.project(19, 19).y, 1216.0);
    }
}
