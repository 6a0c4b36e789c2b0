//! Line segments for rendering a run in an external viewer.
//!
//! Segments are index pairs into the analysed cloud: the principal axis,
//! every width sample that passed the angle filter (the neck sample gets its
//! own kind) and the final cut line. [`resolve_segments`] attaches the point
//! coordinates so a viewer does not need the cloud.
use crate::cloud::PointCloud;
use crate::diagnostics::AnalysisReport;
use crate::error::Result;
use nalgebra::Point3;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    Axis,
    WidthSample,
    Neck,
    Cut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySegment {
    pub from: usize,
    pub to: usize,
    pub kind: SegmentKind,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLine {
    pub kind: SegmentKind,
    pub from: Point3<f32>,
    pub to: Point3<f32>,
}

/// Collects the segments describing `report`, axis first and cut last.
pub fn overlay_segments(report: &AnalysisReport) -> Vec<OverlaySegment> {
    let trace = &report.trace;
    let axis = report.result.axis;
    let mut out = Vec::with_capacity(trace.angle_filter.filtered.len() + 2);
    out.push(OverlaySegment {
        from: axis.start,
        to: axis.end,
        kind: SegmentKind::Axis,
    });
    for kept in &trace.angle_filter.filtered {
        let Some(s) = trace.profile.samples.get(kept.profile_index) else {
            continue;
        };
        let kind = if kept.profile_index == trace.neck.profile_index {
            SegmentKind::Neck
        } else {
            SegmentKind::WidthSample
        };
        out.push(OverlaySegment {
            from: s.opposite,
            to: s.sample,
            kind,
        });
    }
    out.push(OverlaySegment {
        from: report.result.cut.first,
        to: report.result.cut.second,
        kind: SegmentKind::Cut,
    });
    out
}

/// Looks up the end points of every segment in `cloud`.
pub fn resolve_segments(cloud: &PointCloud, segments: &[OverlaySegment]) -> Result<Vec<OverlayLine>> {
    segments
        .iter()
        .map(|seg| {
            Ok(OverlayLine {
                kind: seg.kind,
                from: *cloud.point("overlay", seg.from)?,
                to: *cloud.point("overlay", seg.to)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalysisParams, TaperAnalyzer};
    use crate::error::AnalysisError;
    use crate::synthetic::cone_contour;

    fn report_for_cone() -> (PointCloud, AnalysisReport) {
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        let report = TaperAnalyzer::new(AnalysisParams::default())
            .analyze_with_diagnostics(&cloud)
            .unwrap();
        (cloud, report)
    }

    #[test]
    fn axis_first_cut_last_one_neck() {
        let (_, report) = report_for_cone();
        let segs = overlay_segments(&report);
        assert_eq!(segs.first().map(|s| s.kind), Some(SegmentKind::Axis));
        assert_eq!(segs.last().map(|s| s.kind), Some(SegmentKind::Cut));
        let necks = segs.iter().filter(|s| s.kind == SegmentKind::Neck).count();
        assert_eq!(necks, 1);
        assert_eq!(segs.len(), report.trace.angle_filter.filtered.len() + 2);
    }

    #[test]
    fn resolved_lines_carry_cloud_coordinates() {
        let (cloud, report) = report_for_cone();
        let segs = overlay_segments(&report);
        let lines = resolve_segments(&cloud, &segs).unwrap();
        assert_eq!(lines.len(), segs.len());
        assert_eq!(lines[0].from, cloud.points()[segs[0].from]);
    }

    #[test]
    fn dangling_index_is_reported() {
        let (cloud, _) = report_for_cone();
        let bad = [OverlaySegment {
            from: 0,
            to: 999,
            kind: SegmentKind::Cut,
        }];
        assert!(matches!(
            resolve_segments(&cloud, &bad),
            Err(AnalysisError::IndexOutOfRange { index: 999, .. })
        ));
    }
}
