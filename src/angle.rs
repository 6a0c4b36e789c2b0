//! Angle utilities shared by the angle discriminator and the pose search.
use nalgebra::Vector3;

/// Computes the unsigned angle between two 3D vectors in radians.
/// Returns a value in [0, π]. Zero if the vectors point the same way,
/// π if they are opposite. Inputs need not be normalized; zero-length
/// inputs yield `None`.
#[inline]
pub fn angle_between(a: &Vector3<f32>, b: &Vector3<f32>) -> Option<f32> {
    let na = a.norm();
    let nb = b.norm();
    if !(na > 0.0 && nb > 0.0) {
        return None;
    }
    let cos = (a.dot(b) / (na * nb)).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// [`angle_between`] in degrees.
#[inline]
pub fn angle_between_deg(a: &Vector3<f32>, b: &Vector3<f32>) -> Option<f32> {
    angle_between(a, b).map(f32::to_degrees)
}

/// How far an angle (degrees) is from a right angle.
#[inline]
pub fn deviation_from_perpendicular_deg(angle_deg: f32) -> f32 {
    (angle_deg - 90.0).abs()
}

/// `acos` with its argument clamped into the valid domain.
#[inline]
pub fn safe_acos(x: f32) -> f32 {
    x.clamp(-1.0, 1.0).acos()
}

/// `asin` with its argument clamped into the valid domain.
#[inline]
pub fn safe_asin(x: f32) -> f32 {
    x.clamp(-1.0, 1.0).asin()
}
