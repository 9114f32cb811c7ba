//! The road enemies walk along, as seen by the renderer.
//!
//! Gameplay only ever looks at the progress scalar; this mapping exists so every front end
//! draws the same curve.

use glam::Vec2;

use crate::constants::path::{CASTLE_GATE, CONTROL_POINTS, SPAWN_EDGE};

/// Maps path progress (100 at the spawn edge, 0 at the gate) to a point on the curve, in
/// percent of the play area.
///
/// Progress outside the path (e.g. after knockback overshoots) is clamped to its ends.
pub fn screen_position(progress: f32) -> Vec2 {
    let progress = progress.clamp(CASTLE_GATE, SPAWN_EDGE);
    let t = (SPAWN_EDGE - progress) / (SPAWN_EDGE - CASTLE_GATE);
    cubic_bezier(CONTROL_POINTS, t)
}

fn cubic_bezier([p0, p1, p2, p3]: [Vec2; 4], t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}
