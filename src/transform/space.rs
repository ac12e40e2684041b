//! Conversions between screen space and a text group's local frame.
//!
//! Screen space is y-down with positive rotation clockwise. A group with rotation `θ` and uniform
//! scale `s` maps a local vector `v` to screen as `R(θ) · (s · v)`; the inverse is
//! `(R(−θ) · d) / s`.

use crate::foundation::core::{Affine, Point, Vec2};

fn usable_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Convert a screen-space delta into the local frame of a group rotated by `rotation_deg` and
/// scaled by `scale`.
///
/// With `rotation_deg = 90` and `scale = 1`, a screen delta `(dx, 0)` becomes `(0, −dx)`.
pub fn screen_to_local(delta: Vec2, rotation_deg: f64, scale: f64) -> Vec2 {
    let inverse =
        Affine::scale(1.0 / usable_scale(scale)) * Affine::rotate(-rotation_deg.to_radians());
    (inverse * delta.to_point()).to_vec2()
}

/// Inverse of [`screen_to_local`].
pub fn local_to_screen(delta: Vec2, rotation_deg: f64, scale: f64) -> Vec2 {
    let forward = Affine::rotate(rotation_deg.to_radians()) * Affine::scale(usable_scale(scale));
    (forward * delta.to_point()).to_vec2()
}

/// Absolute rotation for a handle sitting above `center`: 0° when `pointer` is straight above,
/// 90° when it is to the right.
pub fn handle_rotation_deg(center: Point, pointer: Point) -> f64 {
    let d = pointer - center;
    d.y.atan2(d.x).to_degrees() + 90.0
}

/// Clamp each component of `v` into `[-limit, limit]`.
pub fn clamp_components(v: Vec2, limit: f64) -> Vec2 {
    let limit = limit.abs();
    Vec2::new(v.x.clamp(-limit, limit), v.y.clamp(-limit, limit))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/space.rs"]
mod tests;
