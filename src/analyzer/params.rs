//! Parameter types configuring the analysis stages.
//!
//! Each stage owns a small parameter struct; [`AnalysisParams`] groups them.
//! All structs deserialize with `#[serde(default)]`, so a JSON config only
//! needs to mention the knobs it changes.
//!
//! Index-based thresholds (`tip_window`, `neighbor_exclusion`) are expressed
//! in contour steps and assume a reasonably uniform sampling along the
//! outline. Physical quantities (`distance`, `reference_origin`) are in the
//! units of the input cloud.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Parameters for the whole analysis run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisParams {
    pub axis: AxisParams,
    pub profile: ProfileParams,
    pub angle_filter: AngleFilterParams,
    pub neck: NeckSearchParams,
    pub offset: OffsetParams,
    pub combine: CombineParams,
    pub pose: PoseParams,
}

impl AnalysisParams {
    /// Rejects values no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.axis.adjacency_fraction >= 0.0 && self.axis.adjacency_fraction < 0.5) {
            return Err(invalid(
                "axis.adjacencyFraction",
                format!("must be in [0, 0.5), got {}", self.axis.adjacency_fraction),
            ));
        }
        if self.profile.granularity == 0 {
            return Err(invalid("profile.granularity", "must be at least 1".into()));
        }
        for (name, value) in [
            ("profile.granularity", self.profile.granularity),
            ("profile.tipWindow", self.profile.tip_window),
            ("profile.neighborExclusion", self.profile.neighbor_exclusion),
            ("offset.neighborExclusion", self.offset.neighbor_exclusion),
        ] {
            if value > MAX_INDEX_WINDOW {
                return Err(invalid(
                    name,
                    format!("must be at most {MAX_INDEX_WINDOW}, got {value}"),
                ));
            }
        }
        if !(self.angle_filter.tolerance_deg > 0.0 && self.angle_filter.tolerance_deg <= 90.0) {
            return Err(invalid(
                "angleFilter.toleranceDeg",
                format!("must be in (0, 90], got {}", self.angle_filter.tolerance_deg),
            ));
        }
        if self.neck.lookahead_divisor == 0 {
            return Err(invalid("neck.lookaheadDivisor", "must be at least 1".into()));
        }
        if !(self.offset.distance.is_finite() && self.offset.distance > 0.0) {
            return Err(invalid(
                "offset.distance",
                format!("must be positive, got {}", self.offset.distance),
            ));
        }
        if self.combine.consistency_divisor == 0 {
            return Err(invalid(
                "combine.consistencyDivisor",
                "must be at least 1".into(),
            ));
        }
        if self.pose.rotation_steps == 0 {
            return Err(invalid("pose.rotationSteps", "must be at least 1".into()));
        }
        if !self.pose.step_deg.is_finite() {
            return Err(invalid("pose.stepDeg", "must be finite".into()));
        }
        Ok(())
    }
}

/// Upper bound for parameters counted in contour steps.
pub const MAX_INDEX_WINDOW: usize = usize::MAX / 4;

fn invalid(name: &'static str, reason: String) -> AnalysisError {
    AnalysisError::InvalidParameter { name, reason }
}

/// Longest-axis search.
///
/// - `adjacency_fraction`: pairs whose index distance is at most
///   `adjacency_fraction * n` are skipped so two nearly adjacent outline
///   points never form the axis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisParams {
    pub adjacency_fraction: f32,
}

impl Default for AxisParams {
    fn default() -> Self {
        Self {
            adjacency_fraction: 0.2,
        }
    }
}

/// Cross-section width profiling.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileParams {
    /// Index stride between consecutive samples.
    pub granularity: usize,
    /// Samples closer than this (contour steps) to the tip take their
    /// opposite point by mirroring around the tip instead of searching.
    pub tip_window: usize,
    /// Candidates within this many contour steps of a sample are not
    /// considered as its opposite point.
    pub neighbor_exclusion: usize,
}

impl Default for ProfileParams {
    fn default() -> Self {
        Self {
            granularity: 1,
            tip_window: 20,
            neighbor_exclusion: 30,
        }
    }
}

/// Angle discriminator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AngleFilterParams {
    /// Accept a cross-section when its angle to the axis is within this
    /// many degrees of 90°.
    pub tolerance_deg: f32,
}

impl Default for AngleFilterParams {
    fn default() -> Self {
        Self {
            tolerance_deg: 35.0,
        }
    }
}

/// Local-minimum search over the filtered width profile.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NeckSearchParams {
    /// Look-ahead span is `filtered_len / lookahead_divisor` samples.
    pub lookahead_divisor: usize,
    /// How many times the search may reverse direction at a candidate
    /// minimum before accepting it.
    pub max_reversals: usize,
}

impl Default for NeckSearchParams {
    fn default() -> Self {
        Self {
            lookahead_divisor: 12,
            max_reversals: 1,
        }
    }
}

/// Fixed-offset cut estimate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OffsetParams {
    /// Distance from the tip along the axis, in cloud units.
    pub distance: f32,
    /// Contour steps around the first cut point excluded when looking for
    /// the point on the opposite side.
    pub neighbor_exclusion: usize,
}

impl Default for OffsetParams {
    fn default() -> Self {
        Self {
            distance: 0.18,
            neighbor_exclusion: 30,
        }
    }
}

/// Reconciliation of the neck and fixed-offset estimates.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombineParams {
    /// Estimates agree when their contour distance is below
    /// `n / consistency_divisor` (at least one step).
    pub consistency_divisor: usize,
}

impl Default for CombineParams {
    fn default() -> Self {
        Self {
            consistency_divisor: 40,
        }
    }
}

/// End-effector pose synthesis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoseParams {
    /// Number of candidate rotations evaluated.
    pub rotation_steps: usize,
    /// Rotation increment between candidates, in degrees.
    pub step_deg: f32,
    /// Point the tool approach direction is aligned towards (robot base).
    pub reference_origin: [f32; 3],
}

impl Default for PoseParams {
    fn default() -> Self {
        Self {
            rotation_steps: 36,
            step_deg: 10.0,
            reference_origin: [0.0, 0.0, 0.0],
        }
    }
}
