//! Angle helpers shared by the fold controller and the masks

use glam::Vec2;

/// Signed angle from `a` to `b` in radians, counter-clockwise positive
#[inline]
pub fn signed_angle(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b).atan2(a.dot(b))
}

/// Unsigned angle between two vectors in degrees (0..=180)
#[inline]
pub fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
    signed_angle(a, b).abs().to_degrees()
}

/// Mask rotation (degrees) for a fold moving along `dir`
///
/// Measured from straight down; directions with a negative x component map
/// to `360 - angle` so the result covers the full turn.
pub fn rotation_from_down(dir: Vec2) -> f32 {
    let rotation = angle_between_deg(dir, Vec2::NEG_Y);
    if dir.x < 0.0 { 360.0 - rotation } else { rotation }
}
