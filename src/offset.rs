//! Fixed-offset cut estimate.
//!
//! Places a synthetic point `distance` units from the tip along the axis,
//! takes the real outline point nearest to it as the first cut point, then
//! the point nearest to that one on the far side of the contour (beyond
//! `neighbor_exclusion` steps) as the second.
//!
//! The synthetic point is appended to a snapshot of the cloud, not to the
//! input; indices below `cloud.len()` mean the same in both.
use crate::analyzer::params::OffsetParams;
use crate::axis::AxisPair;
use crate::cloud::{contour_distance, PointCloud};
use crate::error::{AnalysisError, Result};
use crate::geometry::vector_between;
use crate::profile::exclusion_min_len;
use log::{debug, warn};
use nalgebra::Point3;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetEstimate {
    pub synthetic_point: Point3<f32>,
    /// Index of the synthetic point in the augmented snapshot.
    pub synthetic_index: usize,
    pub p1: usize,
    pub p2: usize,
    /// Distance from the synthetic point to `p1`.
    pub p1_distance: f32,
    /// Width of the cut between `p1` and `p2`.
    pub width: f32,
}

/// Estimates a cut pair at a fixed physical distance from the tip.
///
/// `axis.start` must be the tip.
pub fn estimate_offset_cut(
    cloud: &PointCloud,
    axis: AxisPair,
    params: &OffsetParams,
) -> Result<OffsetEstimate> {
    let n = cloud.len();
    let dir = vector_between(cloud, axis.start, axis.end, true)?;
    let tip = *cloud.point("offset", axis.start)?;
    let axis_len = nalgebra::distance(&tip, cloud.point("offset", axis.end)?);
    if params.distance > axis_len {
        warn!(
            "offset: distance {:.4} exceeds axis length {:.4}; cut point lies beyond the far end",
            params.distance, axis_len
        );
    }

    let synthetic_point = tip + dir * params.distance;
    let (augmented, synthetic_index) = cloud.with_point(synthetic_point);
    let pts = augmented.points();

    let (p1, p1_d2) = nearest(pts, &synthetic_point, |j| j != synthetic_index).ok_or(
        AnalysisError::InsufficientSamples {
            component: "offset",
            available: 0,
            required: 1,
        },
    )?;
    let (p2, p2_d2) = nearest(pts, &pts[p1], |j| {
        j != synthetic_index && contour_distance(n, j, p1) > params.neighbor_exclusion
    })
    .ok_or(AnalysisError::CloudTooSmall {
        component: "offset",
        len: n,
        min: exclusion_min_len(params.neighbor_exclusion),
    })?;

    debug!(
        "offset: synthetic={} p1={} ({:.4}) p2={} width={:.4}",
        synthetic_index,
        p1,
        p1_d2.sqrt(),
        p2,
        p2_d2.sqrt()
    );
    Ok(OffsetEstimate {
        synthetic_point,
        synthetic_index,
        p1,
        p2,
        p1_distance: p1_d2.sqrt(),
        width: p2_d2.sqrt(),
    })
}

/// Nearest accepted point to `target` with its squared distance; first wins on ties.
fn nearest(
    pts: &[Point3<f32>],
    target: &Point3<f32>,
    accept: impl Fn(usize) -> bool,
) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (j, q) in pts.iter().enumerate() {
        if !accept(j) {
            continue;
        }
        let d2 = (q - target).norm_squared();
        if best.map_or(true, |(_, b)| d2 < b) {
            best = Some((j, d2));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::cone_contour;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn synthetic_point_sits_at_the_configured_distance() {
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        let est = estimate_offset_cut(&cloud, AxisPair::new(0, 100), &OffsetParams::default())
            .unwrap();
        let tip = cloud.points()[0];
        assert!(approx_eq(
            nalgebra::distance(&tip, &est.synthetic_point),
            0.18,
            1e-5
        ));
        assert_eq!(est.synthetic_index, 200);
        assert_eq!(cloud.len(), 200, "input cloud must not grow");
    }

    #[test]
    fn p1_is_the_closest_real_point() {
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        let est = estimate_offset_cut(&cloud, AxisPair::new(0, 100), &OffsetParams::default())
            .unwrap();
        let brute = cloud
            .points()
            .iter()
            .map(|p| nalgebra::distance(p, &est.synthetic_point))
            .fold(f32::INFINITY, f32::min);
        assert!(approx_eq(est.p1_distance, brute, 1e-6));
        assert!(est.p1 < 200);
    }

    #[test]
    fn p2_lies_across_the_object() {
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        let est = estimate_offset_cut(&cloud, AxisPair::new(0, 100), &OffsetParams::default())
            .unwrap();
        assert!(contour_distance(200, est.p1, est.p2) > 30);
        let (a, b) = (cloud.points()[est.p1], cloud.points()[est.p2]);
        assert!(a.y * b.y < 0.0, "cut points should be on opposite sides");
        assert!(approx_eq(a.x, b.x, 0.03));
    }
}
