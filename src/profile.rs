//! Cross-section width profiling.
//!
//! Starting at one axis end, every `granularity`-th contour index is sampled
//! for half a turn around the outline, which walks one side of the object
//! from that end to the other. Each sample is paired with its nearest
//! "opposite" point and the gap between them is its width.
//!
//! Close to the starting end the nearest point across is ambiguous (both
//! sides converge and the seam of the contour may fall there), so samples
//! within `tip_window` steps take the mirror index on the other side of the
//! tip instead of searching. This trades exactness for stability around the
//! seam. All other samples search the whole cloud, skipping candidates
//! within `neighbor_exclusion` contour steps of themselves.
use crate::analyzer::params::ProfileParams;
use crate::cloud::{contour_distance, PointCloud};
use crate::error::{AnalysisError, Result};
use log::debug;
use serde::Serialize;

/// How the opposite point of a sample was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OppositeMethod {
    TipMirror,
    NearestSearch,
}

/// One width measurement across the object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidthSample {
    /// Cloud index of the sampled outline point.
    pub sample: usize,
    /// Cloud index of the point across from it.
    pub opposite: usize,
    pub width: f32,
    /// Contour steps from the profile origin.
    pub offset: usize,
    pub method: OppositeMethod,
}

/// Ordered width measurements starting at `origin`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidthProfile {
    /// Axis end the sampling started from.
    pub origin: usize,
    pub granularity: usize,
    pub samples: Vec<WidthSample>,
}

impl WidthProfile {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn widths(&self) -> Vec<f32> {
        self.samples.iter().map(|s| s.width).collect()
    }
}

/// Smallest cloud the profiler can search with the given exclusion window.
pub fn min_cloud_len(params: &ProfileParams) -> usize {
    exclusion_min_len(params.neighbor_exclusion)
}

/// Points needed for a nearest search that skips `exclusion` contour steps
/// on either side to have a candidate left: `2 * exclusion + 2`, saturating.
pub fn exclusion_min_len(exclusion: usize) -> usize {
    exclusion.saturating_mul(2).saturating_add(2)
}

/// Samples widths along the contour starting at `origin`.
pub fn profile_widths(
    cloud: &PointCloud,
    origin: usize,
    params: &ProfileParams,
) -> Result<WidthProfile> {
    let n = cloud.len();
    cloud.point("profile", origin)?;
    let min_len = min_cloud_len(params);
    if n < min_len {
        return Err(AnalysisError::CloudTooSmall {
            component: "profile",
            len: n,
            min: min_len,
        });
    }
    let gran = params.granularity.max(1);
    let iterations = n / gran.saturating_mul(2);
    if iterations < 2 {
        return Err(AnalysisError::InsufficientSamples {
            component: "profile",
            available: iterations,
            required: 2,
        });
    }

    let pts = cloud.points();
    let mut samples = Vec::with_capacity(iterations);
    let mut mirrored = 0usize;
    for k in 0..iterations {
        let offset = k * gran;
        let sample = (origin + offset) % n;
        let (opposite, method) = if offset < params.tip_window {
            mirrored += 1;
            ((origin + n - offset) % n, OppositeMethod::TipMirror)
        } else {
            let opposite = nearest_opposite(pts, sample, params.neighbor_exclusion).ok_or(
                AnalysisError::InsufficientSamples {
                    component: "profile",
                    available: 0,
                    required: 1,
                },
            )?;
            (opposite, OppositeMethod::NearestSearch)
        };
        let width = nalgebra::distance(&pts[sample], &pts[opposite]);
        samples.push(WidthSample {
            sample,
            opposite,
            width,
            offset,
            method,
        });
    }

    debug!(
        "profile: origin={} samples={} mirrored={} gran={}",
        origin,
        samples.len(),
        mirrored,
        gran
    );
    Ok(WidthProfile {
        origin,
        granularity: gran,
        samples,
    })
}

/// Nearest point to `sample` that is more than `exclusion` contour steps away.
fn nearest_opposite(
    pts: &[nalgebra::Point3<f32>],
    sample: usize,
    exclusion: usize,
) -> Option<usize> {
    let n = pts.len();
    let p = &pts[sample];
    let mut best: Option<(usize, f32)> = None;
    for (j, q) in pts.iter().enumerate() {
        if contour_distance(n, j, sample) <= exclusion {
            continue;
        }
        let d2 = (p - q).norm_squared();
        if best.map_or(true, |(_, b)| d2 < b) {
            best = Some((j, d2));
        }
    }
    best.map(|(j, _)| j)
}
