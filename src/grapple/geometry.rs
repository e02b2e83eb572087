//! Steering vector and view-angle math
//! Angles are degrees: `x` pitch, `y` yaw, `z` roll.

use glam::Vec3;

/// Normalize a vector. Zero-length input maps to the zero vector so callers
/// never divide by zero.
pub fn normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Unit vector the player is looking along, from pitch and yaw.
pub fn forward_vector(view_angles: Vec3) -> Vec3 {
    let pitch = view_angles.x.to_radians();
    let yaw = view_angles.y.to_radians();
    Vec3::new(
        pitch.cos() * yaw.cos(),
        pitch.cos() * yaw.sin(),
        -pitch.sin(),
    )
}

/// Strafe axis for the given yaw. Pitch and roll are ignored, keeping the
/// lateral curve on the ground plane.
pub fn right_vector(view_angles: Vec3) -> Vec3 {
    let yaw = (view_angles.y - 90.0).to_radians();
    Vec3::new(yaw.cos(), yaw.sin(), 0.0)
}

/// Coarse gaze test between two orientations: the larger of the wrapped
/// pitch and yaw deltas, each folded into `[0, 180]`.
///
/// Not a true angular metric; roll never contributes and the axes are
/// compared independently.
pub fn angular_difference(a: Vec3, b: Vec3) -> f32 {
    let pitch = wrap_degrees((a.x - b.x).abs());
    let yaw = wrap_degrees((a.y - b.y).abs());
    pitch.max(yaw)
}

/// Fold an absolute degree delta into `[0, 180]`.
fn wrap_degrees(delta: f32) -> f32 {
    let delta = delta.rem_euclid(360.0);
    if delta > 180.0 {
        360.0 - delta
    } else {
        delta
    }
}
