//! Screen-space geometry for moving and hit-testing entities
//!
//! Coordinates are screen pixels with Y growing downward, so a positive
//! angle turns counter-clockwise on screen while the Y component of any
//! displacement flips sign relative to the math convention.

use glam::Vec2;

/// Displace a point along `angle` by `dist` (screen Y is inverted)
#[inline]
pub fn advance(p: Vec2, angle: f32, dist: f32) -> Vec2 {
    Vec2::new(p.x + angle.cos() * dist, p.y - angle.sin() * dist)
}

/// Rotate `p` about `center` by `angle` in screen space
#[inline]
pub fn rotate_about(p: Vec2, center: Vec2, angle: f32) -> Vec2 {
    let d = p - center;
    let (sin, cos) = angle.sin_cos();
    Vec2::new(
        d.x * cos + d.y * sin + center.x,
        -d.x * sin + d.y * cos + center.y,
    )
}

/// Angle from `from` toward `to` under the inverted-Y convention
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let v = to - from;
    (-v.y).atan2(v.x)
}

/// Point-in-convex-polygon via half-plane tests
///
/// `dots` must be wound so that every interior point sits on the
/// non-negative side of each directed edge (wraparound edge included).
pub fn point_in_hull(dots: &[Vec2], p: Vec2) -> bool {
    let n = dots.len();
    for i in 0..n {
        let a = dots[i];
        let b = dots[(i + 1) % n];
        if (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x) < 0.0 {
            return false;
        }
    }
    true
}
