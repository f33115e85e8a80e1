//! Discrete collision detection for axis-aligned boxes
//!
//! Everything in the game collides as an AABB: the test compares center
//! distance against combined half-extents on each axis. There is no swept
//! detection; a sufficiently fast entity can tunnel through a thin
//! collidable in one step, which is acceptable at lander speeds.

use glam::Vec3;

/// Axis-aligned overlap test using half-extents.
///
/// Overlap occurs iff `|dx| - (wa + wb) / 2 < 0` and
/// `|dy| - (ha + hb) / 2 < 0`. Extents are assumed non-negative; a
/// zero-area box never overlaps anything (strict inequality).
#[inline]
pub fn aabb_overlap(pos_a: Vec3, wa: f32, ha: f32, pos_b: Vec3, wb: f32, hb: f32) -> bool {
    let x_distance = (pos_a.x - pos_b.x).abs() - (wa + wb) / 2.0;
    let y_distance = (pos_a.y - pos_b.y).abs() - (ha + hb) / 2.0;

    x_distance < 0.0 && y_distance < 0.0
}
