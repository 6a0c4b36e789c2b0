//! Longest-axis search.
//!
//! The principal axis is taken as the line through the two most distant
//! outline points. Candidate starts are drawn from the first half of the
//! indices and paired with every index; pairs that sit close together on the
//! contour are skipped so a run of neighbouring points never wins.
//!
//! The scan is O(n²) and dominates the run time for large clouds. Ties keep
//! the first pair seen in scan order, which makes the result deterministic.
use crate::analyzer::params::AxisParams;
use crate::cloud::PointCloud;
use crate::error::{AnalysisError, Result};
use log::debug;
use serde::Serialize;

/// Two indices marking the ends of the principal axis.
///
/// After orientation classification `start` is the narrow tip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisPair {
    pub start: usize,
    pub end: usize,
}

impl AxisPair {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Same axis with its ends exchanged.
    pub fn swapped(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

/// Result of the axis search.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisEstimate {
    pub axis: AxisPair,
    pub length: f32,
    /// Pairs with index distance at or below this were skipped.
    pub min_index_gap: usize,
    pub pairs_evaluated: usize,
}

/// Finds the most distant pair of points subject to the adjacency filter.
pub fn find_longest_axis(cloud: &PointCloud, params: &AxisParams) -> Result<AxisEstimate> {
    let n = cloud.len();
    if n < 3 {
        return Err(AnalysisError::CloudTooSmall {
            component: "axis",
            len: n,
            min: 3,
        });
    }
    let pts = cloud.points();
    let min_gap = (n as f32 * params.adjacency_fraction).floor() as usize;

    let mut best: Option<(usize, usize, f32)> = None;
    let mut evaluated = 0usize;
    for i in 0..n / 2 {
        let pi = &pts[i];
        for (j, pj) in pts.iter().enumerate() {
            if i.abs_diff(j) <= min_gap {
                continue;
            }
            evaluated += 1;
            let d2 = (pi - pj).norm_squared();
            if best.map_or(true, |(_, _, b)| d2 > b) {
                best = Some((i, j, d2));
            }
        }
    }

    let (start, end, d2) = best.ok_or(AnalysisError::InsufficientSamples {
        component: "axis",
        available: 0,
        required: 1,
    })?;
    if d2 <= 0.0 {
        return Err(AnalysisError::ZeroLengthVector {
            component: "axis",
            from: start,
            to: end,
        });
    }
    let length = d2.sqrt();
    debug!(
        "axis: [{}, {}] length={:.4} (gap>{} pairs={})",
        start, end, length, min_gap, evaluated
    );
    Ok(AxisEstimate {
        axis: AxisPair::new(start, end),
        length,
        min_index_gap: min_gap,
        pairs_evaluated: evaluated,
    })
}
