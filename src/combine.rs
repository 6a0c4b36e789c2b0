//! Reconciles the neck and fixed-offset cut estimates.
//!
//! The profile-based neck is trusted when the offset estimate corroborates
//! it, i.e. when the neck sample lies within `n / consistency_divisor`
//! contour steps of either offset cut point. Otherwise the fixed-offset pair
//! stands.
use crate::analyzer::params::CombineParams;
use crate::cloud::contour_distance;
use crate::neck::NeckEstimate;
use crate::offset::OffsetEstimate;
use log::debug;
use serde::Serialize;

/// Two cloud indices defining the cut line across the object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutPair {
    pub first: usize,
    pub second: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CutSource {
    /// Neck confirmed by the fixed-offset estimate.
    Neck,
    /// Fixed-offset estimate used on its own.
    Offset,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombineDecision {
    pub cut: CutPair,
    pub source: CutSource,
    pub tolerance: usize,
    pub neck_to_p1: usize,
    pub neck_to_p2: usize,
}

/// Chooses the final cut pair for a contour of `n` points.
pub fn combine_estimates(
    n: usize,
    neck: &NeckEstimate,
    offset: &OffsetEstimate,
    params: &CombineParams,
) -> CombineDecision {
    let tolerance = (n / params.consistency_divisor.max(1)).max(1);
    let neck_index = neck.sample.sample;
    let neck_to_p1 = contour_distance(n, neck_index, offset.p1);
    let neck_to_p2 = contour_distance(n, neck_index, offset.p2);

    let (cut, source) = if neck_to_p1 < tolerance || neck_to_p2 < tolerance {
        (
            CutPair {
                first: neck.sample.opposite,
                second: neck.sample.sample,
            },
            CutSource::Neck,
        )
    } else {
        (
            CutPair {
                first: offset.p1,
                second: offset.p2,
            },
            CutSource::Offset,
        )
    };
    debug!(
        "combine: neck={} p1={} p2={} tol={} -> {:?}",
        neck_index, offset.p1, offset.p2, tolerance, source
    );
    CombineDecision {
        cut,
        source,
        tolerance,
        neck_to_p1,
        neck_to_p2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neck::MinimumSearch;
    use crate::profile::{OppositeMethod, WidthSample};
    use nalgebra::Point3;

    fn neck_at(sample: usize, opposite: usize) -> NeckEstimate {
        NeckEstimate {
            filtered_index: 0,
            profile_index: 0,
            sample: WidthSample {
                sample,
                opposite,
                width: 0.1,
                offset: sample,
                method: OppositeMethod::NearestSearch,
            },
            search: MinimumSearch {
                index: 0,
                value: 0.1,
                start_index: 0,
                moves: 0,
                reversals: 0,
            },
        }
    }

    fn offset_at(p1: usize, p2: usize) -> OffsetEstimate {
        OffsetEstimate {
            synthetic_point: Point3::origin(),
            synthetic_index: 400,
            p1,
            p2,
            p1_distance: 0.0,
            width: 0.1,
        }
    }

    #[test]
    fn coinciding_estimates_pick_the_neck() {
        let d = combine_estimates(400, &neck_at(40, 360), &offset_at(40, 358), &CombineParams::default());
        assert_eq!(d.source, CutSource::Neck);
        assert_eq!(d.cut, CutPair { first: 360, second: 40 });
    }

    #[test]
    fn coincidence_wins_even_on_tiny_clouds() {
        let d = combine_estimates(20, &neck_at(5, 15), &offset_at(5, 14), &CombineParams::default());
        assert_eq!(d.tolerance, 1);
        assert_eq!(d.source, CutSource::Neck);
    }

    #[test]
    fn match_against_p2_also_counts() {
        let d = combine_estimates(400, &neck_at(40, 360), &offset_at(300, 43), &CombineParams::default());
        assert_eq!(d.source, CutSource::Neck);
        assert_eq!(d.neck_to_p2, 3);
    }

    #[test]
    fn distant_estimates_keep_the_offset_pair() {
        let d = combine_estimates(400, &neck_at(40, 360), &offset_at(80, 320), &CombineParams::default());
        assert_eq!(d.source, CutSource::Offset);
        assert_eq!(d.cut, CutPair { first: 80, second: 320 });
        assert_eq!(d.tolerance, 10);
    }

    #[test]
    fn distance_is_measured_around_the_seam() {
        let d = combine_estimates(400, &neck_at(2, 398), &offset_at(396, 5), &CombineParams::default());
        assert_eq!(d.neck_to_p1, 6);
        assert_eq!(d.source, CutSource::Neck);
    }
}
