//! Angle discriminator for width samples.
//!
//! A genuine cross-section runs roughly perpendicular to the principal axis.
//! Samples whose span deviates from 90° by `tolerance_deg` or more are
//! rejected, as are degenerate samples whose two points coincide. Rejected
//! samples stay in the profile; the filtered list only records which profile
//! positions survived so the neck can be mapped back afterwards.
use crate::analyzer::params::AngleFilterParams;
use crate::angle::{angle_between_deg, deviation_from_perpendicular_deg};
use crate::axis::AxisPair;
use crate::cloud::PointCloud;
use crate::error::Result;
use crate::geometry::{unit, vector_between};
use crate::profile::WidthProfile;
use log::{debug, warn};
use serde::Serialize;

/// Per-sample verdict.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SampleValidity {
    Valid { angle_deg: f32 },
    Skewed { angle_deg: f32 },
    /// Zero-length cross-section; no direction to test.
    Degenerate,
}

impl SampleValidity {
    pub fn is_valid(&self) -> bool {
        matches!(self, SampleValidity::Valid { .. })
    }
}

/// A width that passed the filter, tagged with its position in the profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredWidth {
    pub profile_index: usize,
    pub width: f32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleFilterOutcome {
    /// One entry per profile sample, in profile order.
    pub validity: Vec<SampleValidity>,
    pub filtered: Vec<FilteredWidth>,
    pub skewed: usize,
    pub degenerate: usize,
}

impl AngleFilterOutcome {
    pub fn filtered_widths(&self) -> Vec<f32> {
        self.filtered.iter().map(|f| f.width).collect()
    }
}

/// Classifies every profile sample against the axis direction.
pub fn filter_by_angle(
    cloud: &PointCloud,
    axis: AxisPair,
    profile: &WidthProfile,
    params: &AngleFilterParams,
) -> Result<AngleFilterOutcome> {
    let axis_dir = vector_between(cloud, axis.start, axis.end, true)?;
    let mut validity = Vec::with_capacity(profile.len());
    let mut filtered = Vec::new();
    let (mut skewed, mut degenerate) = (0usize, 0usize);

    for (k, s) in profile.samples.iter().enumerate() {
        let span = vector_between(cloud, s.opposite, s.sample, false)?;
        let verdict = match unit(span).and_then(|v| angle_between_deg(&axis_dir, &v)) {
            None => {
                degenerate += 1;
                SampleValidity::Degenerate
            }
            Some(angle_deg) if deviation_from_perpendicular_deg(angle_deg) < params.tolerance_deg => {
                filtered.push(FilteredWidth {
                    profile_index: k,
                    width: s.width,
                });
                SampleValidity::Valid { angle_deg }
            }
            Some(angle_deg) => {
                skewed += 1;
                SampleValidity::Skewed { angle_deg }
            }
        };
        validity.push(verdict);
    }

    if degenerate * 10 > profile.len() {
        warn!(
            "angle filter: {} of {} samples are degenerate",
            degenerate,
            profile.len()
        );
    }
    debug!(
        "angle filter: kept={} skewed={} degenerate={} tol={}deg",
        filtered.len(),
        skewed,
        degenerate,
        params.tolerance_deg
    );
    Ok(AngleFilterOutcome {
        validity,
        filtered,
        skewed,
        degenerate,
    })
}
