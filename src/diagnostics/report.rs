use crate::axis::{AxisEstimate, AxisPair};
use crate::cloud::PointOrder;
use crate::combine::{CombineDecision, CutPair, CutSource};
use crate::diagnostics::TimingBreakdown;
use crate::discriminator::AngleFilterOutcome;
use crate::neck::NeckEstimate;
use crate::offset::OffsetEstimate;
use crate::orientation::OrientationDecision;
use crate::pose::{Pose, RotationSearch};
use crate::profile::WidthProfile;
use serde::Serialize;

/// Result produced by [`TaperAnalyzer::analyze_with_diagnostics`](crate::TaperAnalyzer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub result: CutResult,
    pub trace: AnalysisTrace,
}

/// Compact outcome of a run.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutResult {
    /// Principal axis with `start` at the tip.
    pub axis: AxisPair,
    pub axis_length: f32,
    pub cut: CutPair,
    pub source: CutSource,
    pub pose: Pose,
}

/// Stage-by-stage record of the run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub axis: AxisEstimate,
    /// Profile sampled from the oriented tip.
    pub profile: WidthProfile,
    /// Set when the orientation check flipped the axis and the profile was
    /// sampled again from the new tip.
    pub reprofiled: bool,
    pub orientation: OrientationDecision,
    pub angle_filter: AngleFilterOutcome,
    pub neck: NeckEstimate,
    pub offset: OffsetEstimate,
    pub combine: CombineDecision,
    pub rotation: RotationSearch,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub points: usize,
    pub order: PointOrder,
}

fn format_triplet(v: [f32; 3]) -> String {
    format!("({:.4}, {:.4}, {:.4})", v[0], v[1], v[2])
}

impl AnalysisReport {
    /// Human-readable account of the axis, tip side, neck, combination
    /// decision and pose.
    pub fn summary_lines(&self) -> Vec<String> {
        let r = &self.result;
        let t = &self.trace;
        let source = match r.source {
            CutSource::Neck => "neck confirmed by offset estimate",
            CutSource::Offset => "offset estimate (neck not corroborated)",
        };
        let p = r.pose.position;
        vec![
            format!(
                "input: {} points ({:?})",
                t.input.points, t.input.order
            ),
            format!(
                "axis: {} -> {} length {:.4} ({} pairs, gap > {})",
                t.axis.axis.start,
                t.axis.axis.end,
                t.axis.length,
                t.axis.pairs_evaluated,
                t.axis.min_index_gap
            ),
            format!(
                "tip: index {} (half means {:.4} / {:.4}, {})",
                r.axis.start,
                t.orientation.first_half_mean,
                t.orientation.second_half_mean,
                if t.orientation.swapped {
                    "axis swapped"
                } else {
                    "axis kept"
                }
            ),
            format!(
                "profile: {} samples, {} kept, {} skewed, {} degenerate",
                t.profile.len(),
                t.angle_filter.filtered.len(),
                t.angle_filter.skewed,
                t.angle_filter.degenerate
            ),
            format!(
                "neck: profile sample {} spans {} <-> {} width {:.4}",
                t.neck.profile_index,
                t.neck.sample.opposite,
                t.neck.sample.sample,
                t.neck.sample.width
            ),
            format!(
                "offset: p1={} p2={} width {:.4}",
                t.offset.p1, t.offset.p2, t.offset.width
            ),
            format!(
                "decision: cut {} <-> {} from {} (distances {} / {}, tolerance {})",
                r.cut.first,
                r.cut.second,
                source,
                t.combine.neck_to_p1,
                t.combine.neck_to_p2,
                t.combine.tolerance
            ),
            format!(
                "pose: position {} orientation {} rad",
                format_triplet([p.x, p.y, p.z]),
                format_triplet(r.pose.orientation)
            ),
            match t.timings.slowest() {
                Some(slow) => format!(
                    "latency: {:.3} ms (slowest stage {} {:.3} ms)",
                    t.timings.total_ms, slow.stage, slow.elapsed_ms
                ),
                None => format!("latency: {:.3} ms", t.timings.total_ms),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::{AnalysisParams, TaperAnalyzer};
    use crate::cloud::PointCloud;
    use crate::synthetic::cone_contour;

    #[test]
    fn summary_mentions_every_stage() {
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        let report = TaperAnalyzer::new(AnalysisParams::default())
            .analyze_with_diagnostics(&cloud)
            .unwrap();
        let text = report.summary_lines().join("\n");
        for key in ["axis:", "tip:", "neck:", "offset:", "decision:", "pose:", "slowest stage"] {
            assert!(text.contains(key), "missing {key} in\n{text}");
        }
    }

    #[test]
    fn report_serializes_in_camel_case() {
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        let report = TaperAnalyzer::new(AnalysisParams::default())
            .analyze_with_diagnostics(&cloud)
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["result"]["axisLength"].is_number());
        assert!(json["trace"]["angleFilter"]["filtered"].is_array());
        assert_eq!(json["trace"]["input"]["order"], "contour");
    }
}
