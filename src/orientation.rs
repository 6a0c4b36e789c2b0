//! Decides which axis end is the narrow tip.
//!
//! The width profile is split into halves. The half with the smaller mean
//! width lies at the tip. The decision depends only on the profile (and the
//! end it was sampled from), never on the current order of the axis pair, so
//! classifying an already oriented axis with the same profile is a no-op.
use crate::axis::AxisPair;
use crate::error::{AnalysisError, Result};
use crate::profile::WidthProfile;
use log::debug;
use serde::Serialize;

/// Outcome of the orientation check.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationDecision {
    /// Axis with `start` at the narrow tip.
    pub axis: AxisPair,
    /// Whether the input axis had to be flipped.
    pub swapped: bool,
    pub first_half_mean: f32,
    pub second_half_mean: f32,
}

/// Orients `axis` so that `start` is the narrow end.
///
/// `profile` must have been sampled from one of the axis ends. Ties count as
/// "not narrower" and put the tip at the far end of the profile.
pub fn classify_orientation(axis: AxisPair, profile: &WidthProfile) -> Result<OrientationDecision> {
    let far = if profile.origin == axis.start {
        axis.end
    } else if profile.origin == axis.end {
        axis.start
    } else {
        return Err(AnalysisError::InvalidParameter {
            name: "profile.origin",
            reason: format!(
                "profile starts at {} which is not an end of axis [{}, {}]",
                profile.origin, axis.start, axis.end
            ),
        });
    };
    if profile.len() < 2 {
        return Err(AnalysisError::InsufficientSamples {
            component: "orientation",
            available: profile.len(),
            required: 2,
        });
    }

    let widths = profile.widths();
    let half = widths.len() / 2;
    let first_half_mean = mean(&widths[..half]);
    let second_half_mean = mean(&widths[half..]);
    let tip = if first_half_mean < second_half_mean {
        profile.origin
    } else {
        far
    };
    let oriented = if tip == axis.start { axis } else { axis.swapped() };
    let swapped = oriented != axis;
    debug!(
        "orientation: means {:.4} / {:.4} -> tip={} swapped={}",
        first_half_mean, second_half_mean, oriented.start, swapped
    );
    Ok(OrientationDecision {
        axis: oriented,
        swapped,
        first_half_mean,
        second_half_mean,
    })
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}
