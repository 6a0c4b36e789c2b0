//! End-effector pose synthesis.
//!
//! The tool is placed at the midpoint of the cut pair. Its orientation comes
//! from a discrete search: with `across` the cut direction and `along` the
//! axis direction, `rotvec = across × along` is swept around
//! `planevec = across × rotvec` in `rotation_steps` increments of `step_deg`
//! (Rodrigues' formula), and the candidate closest in angle to the direction
//! from the cut towards `reference_origin` wins. The three angles are
//! `acos(planevec.x)`, `asin(best.y)` and `atan2(best.x, best.z)`.
//!
//! This is a heuristic: the true optimum may fall between two candidates and
//! the error is bounded by half a step.
use crate::analyzer::params::PoseParams;
use crate::angle::{angle_between_deg, safe_acos, safe_asin};
use crate::axis::AxisPair;
use crate::cloud::PointCloud;
use crate::combine::CutPair;
use crate::error::{AnalysisError, Result};
use crate::geometry::{midpoint, unit, vector_between};
use log::debug;
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Target frame for the end effector: position plus three angles (radians).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    pub position: Point3<f32>,
    pub orientation: [f32; 3],
}

impl Pose {
    /// `[x, y, z, a, b, c]`
    pub fn to_array(&self) -> [f32; 6] {
        let p = self.position;
        let o = self.orientation;
        [p.x, p.y, p.z, o[0], o[1], o[2]]
    }
}

/// Trace of the discrete rotation search.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationSearch {
    pub step_deg: f32,
    pub best_step: usize,
    pub best_angle_deg: f32,
    /// Angle to the reference direction for each candidate.
    pub candidate_angles_deg: Vec<f32>,
    pub rotvec: Vector3<f32>,
    pub planevec: Vector3<f32>,
    pub reference: Vector3<f32>,
    pub rotated: Vector3<f32>,
}

/// Rotates `v` about the unit axis `k` by `theta` radians.
#[inline]
pub fn rodrigues_rotate(v: &Vector3<f32>, k: &Vector3<f32>, theta: f32) -> Vector3<f32> {
    let (s, c) = theta.sin_cos();
    v * c + k.cross(v) * s + k * (k.dot(v) * (1.0 - c))
}

/// Computes the tool pose for `cut` on an object with principal `axis`.
pub fn synthesize_pose(
    cloud: &PointCloud,
    cut: CutPair,
    axis: AxisPair,
    params: &PoseParams,
) -> Result<(Pose, RotationSearch)> {
    let start = cloud.point("pose", cut.first)?;
    let end = cloud.point("pose", cut.second)?;
    let position = midpoint(start, end);

    let across = vector_between(cloud, cut.first, cut.second, true)?;
    let along = vector_between(cloud, axis.start, axis.end, true)?;
    // Cut parallel to the axis leaves the sweep plane undefined.
    let rotvec = unit(across.cross(&along)).ok_or(AnalysisError::ZeroLengthVector {
        component: "pose",
        from: cut.first,
        to: cut.second,
    })?;
    let planevec = unit(across.cross(&rotvec)).ok_or(AnalysisError::ZeroLengthVector {
        component: "pose",
        from: cut.first,
        to: cut.second,
    })?;
    let origin = Point3::from(params.reference_origin);
    let reference = unit(origin - position).ok_or_else(|| AnalysisError::InvalidParameter {
        name: "pose.referenceOrigin",
        reason: format!("coincides with the cut position {:?}", position),
    })?;

    let step = params.step_deg.to_radians();
    let mut candidate_angles_deg = Vec::with_capacity(params.rotation_steps);
    let mut best: Option<(usize, f32)> = None;
    for k in 0..params.rotation_steps {
        let candidate = rodrigues_rotate(&rotvec, &planevec, k as f32 * step);
        let angle = angle_between_deg(&candidate, &reference).unwrap_or(f32::INFINITY);
        candidate_angles_deg.push(angle);
        if best.map_or(true, |(_, b)| angle < b) {
            best = Some((k, angle));
        }
    }
    let (best_step, best_angle_deg) = best.ok_or(AnalysisError::InvalidParameter {
        name: "pose.rotationSteps",
        reason: "no candidate rotations evaluated".into(),
    })?;
    let rotated = rodrigues_rotate(&rotvec, &planevec, best_step as f32 * step).normalize();

    let orientation = [
        safe_acos(planevec.x),
        safe_asin(rotated.y),
        rotated.x.atan2(rotated.z),
    ];
    debug!(
        "pose: position=({:.4}, {:.4}, {:.4}) best step {} ({:.2} deg off reference)",
        position.x, position.y, position.z, best_step, best_angle_deg
    );
    Ok((
        Pose {
            position,
            orientation,
        },
        RotationSearch {
            step_deg: params.step_deg,
            best_step,
            best_angle_deg,
            candidate_angles_deg,
            rotvec,
            planevec,
            reference,
            rotated,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Unit};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // Cut across y at x = 2, axis along +x.
    fn cloud() -> PointCloud {
        PointCloud::from_contour(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(2.0, -1.0, 0.0),
        ])
    }

    fn cut() -> CutPair {
        CutPair { first: 2, second: 3 }
    }

    #[test]
    fn rodrigues_matches_rotation_matrix() {
        let v = Vector3::new(0.3f32, -1.2, 0.7);
        let k = Vector3::new(1.0f32, 2.0, -0.5).normalize();
        let theta = 0.83;
        let expected = Rotation3::from_axis_angle(&Unit::new_normalize(k), theta) * v;
        let got = rodrigues_rotate(&v, &k, theta);
        assert!((got - expected).norm() < 1e-5, "got {got:?} expected {expected:?}");
    }

    #[test]
    fn position_is_cut_midpoint() {
        let params = PoseParams {
            reference_origin: [2.0, 0.0, 5.0],
            ..Default::default()
        };
        let (pose, _) = synthesize_pose(&cloud(), cut(), AxisPair::new(0, 1), &params).unwrap();
        assert_eq!(pose.position, Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn reference_along_rotvec_selects_step_zero() {
        // across = -y, along = +x, rotvec = +z, planevec = -x.
        let params = PoseParams {
            reference_origin: [2.0, 0.0, 5.0],
            ..Default::default()
        };
        let (pose, search) =
            synthesize_pose(&cloud(), cut(), AxisPair::new(0, 1), &params).unwrap();
        assert_eq!(search.best_step, 0);
        assert!(approx_eq(search.best_angle_deg, 0.0));
        assert!(approx_eq(pose.orientation[0], PI));
        assert!(approx_eq(pose.orientation[1], 0.0));
        assert!(approx_eq(pose.orientation[2], 0.0));
    }

    #[test]
    fn quarter_turn_is_found_with_degree_steps() {
        // Sweep about -x takes +z to +y after 90°, i.e. step 9 of 10°.
        let params = PoseParams {
            reference_origin: [2.0, 5.0, 0.0],
            ..Default::default()
        };
        let (pose, search) =
            synthesize_pose(&cloud(), cut(), AxisPair::new(0, 1), &params).unwrap();
        assert_eq!(search.best_step, 9);
        assert_eq!(search.candidate_angles_deg.len(), 36);
        assert!(approx_eq(pose.orientation[1], FRAC_PI_2));
        for a in pose.orientation {
            assert!((-PI..=PI).contains(&a));
        }
    }

    #[test]
    fn cut_parallel_to_axis_is_rejected() {
        let cut = CutPair { first: 0, second: 1 };
        let err = synthesize_pose(&cloud(), cut, AxisPair::new(0, 1), &PoseParams::default());
        assert!(matches!(
            err,
            Err(AnalysisError::ZeroLengthVector {
                component: "pose",
                ..
            })
        ));
    }

    #[test]
    fn reference_at_cut_position_is_rejected() {
        let params = PoseParams {
            reference_origin: [2.0, 0.0, 0.0],
            ..Default::default()
        };
        assert!(matches!(
            synthesize_pose(&cloud(), cut(), AxisPair::new(0, 1), &params),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn pose_flattens_to_six_values() {
        let pose = Pose {
            position: Point3::new(1.0, 2.0, 3.0),
            orientation: [0.1, 0.2, 0.3],
        };
        assert_eq!(pose.to_array(), [1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
    }
}
