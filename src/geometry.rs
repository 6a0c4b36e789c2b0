//! Distance and vector helpers over indexed cloud points.
//!
//! The checked variants validate indices and are used at stage boundaries;
//! the hot inner loops of the axis and width searches index the point slice
//! directly after validating their ranges once.
use crate::cloud::PointCloud;
use crate::error::{AnalysisError, Result};
use nalgebra::{Point3, Vector3};

const COMPONENT: &str = "geometry";

/// Vectors shorter than this are treated as zero-length.
pub const MIN_VECTOR_NORM: f32 = 1e-9;

/// Euclidean distance between points `i` and `j`.
pub fn distance(cloud: &PointCloud, i: usize, j: usize) -> Result<f32> {
    let a = cloud.point(COMPONENT, i)?;
    let b = cloud.point(COMPONENT, j)?;
    Ok(nalgebra::distance(a, b))
}

/// Distance of point `i` from the frame origin.
pub fn distance_to_origin(cloud: &PointCloud, i: usize) -> Result<f32> {
    Ok(cloud.point(COMPONENT, i)?.coords.norm())
}

/// Vector pointing from point `from` to point `to`.
///
/// With `normalize` set, a zero-length result is an invariant violation and
/// reported as [`AnalysisError::ZeroLengthVector`].
pub fn vector_between(
    cloud: &PointCloud,
    from: usize,
    to: usize,
    normalize: bool,
) -> Result<Vector3<f32>> {
    let a = cloud.point(COMPONENT, from)?;
    let b = cloud.point(COMPONENT, to)?;
    let v = b - a;
    if !normalize {
        return Ok(v);
    }
    unit(v).ok_or(AnalysisError::ZeroLengthVector {
        component: COMPONENT,
        from,
        to,
    })
}

/// Normalizes `v`, or `None` when it is (numerically) zero or not finite.
#[inline]
pub fn unit(v: Vector3<f32>) -> Option<Vector3<f32>> {
    let n = v.norm();
    if n.is_finite() && n > MIN_VECTOR_NORM {
        Some(v / n)
    } else {
        None
    }
}

/// Midpoint computed as `end + (start - end) / 2`.
#[inline]
pub fn midpoint(start: &Point3<f32>, end: &Point3<f32>) -> Point3<f32> {
    end + (start - end) * 0.5
}
