//! Analysis driver running the stages end-to-end.
//!
//! [`TaperAnalyzer`] takes a contour-ordered cloud and returns the cut pose,
//! optionally with a full [`AnalysisReport`]. Stages run strictly in order:
//! longest axis, width profile from one axis end, orientation (re-profiling
//! from the other end if the axis was flipped), angle filter, neck search,
//! fixed-offset estimate, combination and pose synthesis.
//!
//! ```no_run
//! use taper_cut::{AnalysisParams, PointCloud, TaperAnalyzer};
//!
//! # fn example(cloud: PointCloud) -> taper_cut::Result<()> {
//! let analyzer = TaperAnalyzer::new(AnalysisParams::default());
//! let report = analyzer.analyze_with_diagnostics(&cloud)?;
//! for line in report.summary_lines() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
use super::params::AnalysisParams;
use crate::axis::find_longest_axis;
use crate::cloud::PointCloud;
use crate::combine::combine_estimates;
use crate::diagnostics::timing::StageClock;
use crate::diagnostics::{AnalysisReport, AnalysisTrace, CutResult, InputDescriptor};
use crate::discriminator::filter_by_angle;
use crate::error::{AnalysisError, Result};
use crate::neck::locate_neck;
use crate::offset::estimate_offset_cut;
use crate::orientation::classify_orientation;
use crate::pose::{synthesize_pose, Pose};
use crate::profile::{exclusion_min_len, min_cloud_len, profile_widths};
use log::{debug, info};

/// Stateless driver for the cut-point analysis.
#[derive(Clone, Debug, Default)]
pub struct TaperAnalyzer {
    params: AnalysisParams,
}

impl TaperAnalyzer {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Smallest cloud every stage can work with under the current parameters.
    pub fn min_cloud_len(&self) -> usize {
        min_cloud_len(&self.params.profile).max(exclusion_min_len(self.params.offset.neighbor_exclusion))
    }

    /// Runs the analysis and returns only the pose.
    pub fn analyze(&self, cloud: &PointCloud) -> Result<Pose> {
        self.analyze_with_diagnostics(cloud)
            .map(|report| report.result.pose)
    }

    /// Runs the analysis and returns the result with a per-stage trace.
    pub fn analyze_with_diagnostics(&self, cloud: &PointCloud) -> Result<AnalysisReport> {
        let p = &self.params;
        p.validate()?;
        cloud.require_contour()?;
        let min = self.min_cloud_len();
        if cloud.len() < min {
            return Err(AnalysisError::CloudTooSmall {
                component: "analyzer",
                len: cloud.len(),
                min,
            });
        }
        debug!("TaperAnalyzer::analyze start points={}", cloud.len());
        let mut clock = StageClock::start();

        let axis = clock.time("axis", || find_longest_axis(cloud, &p.axis))?;
        let initial = clock.time("profile", || {
            profile_widths(cloud, axis.axis.start, &p.profile)
        })?;
        let orientation = clock.time("orientation", || {
            classify_orientation(axis.axis, &initial)
        })?;
        let oriented = orientation.axis;

        // The profile has to run from the tip for the neck search and the
        // overlay to line up with the oriented axis.
        let reprofiled = initial.origin != oriented.start;
        let profile = if reprofiled {
            clock.time("reprofile", || {
                profile_widths(cloud, oriented.start, &p.profile)
            })?
        } else {
            initial
        };

        let angle_filter = clock.time("angle_filter", || {
            filter_by_angle(cloud, oriented, &profile, &p.angle_filter)
        })?;
        let neck = clock.time("neck", || locate_neck(&profile, &angle_filter, &p.neck))?;
        let offset = clock.time("offset", || estimate_offset_cut(cloud, oriented, &p.offset))?;
        let combine = clock.time("combine", || {
            combine_estimates(cloud.len(), &neck, &offset, &p.combine)
        });
        let (pose, rotation) = clock.time("pose", || {
            synthesize_pose(cloud, combine.cut, oriented, &p.pose)
        })?;
        let timings = clock.finish();

        let report = AnalysisReport {
            result: CutResult {
                axis: oriented,
                axis_length: axis.length,
                cut: combine.cut,
                source: combine.source,
                pose,
            },
            trace: AnalysisTrace {
                input: InputDescriptor {
                    points: cloud.len(),
                    order: cloud.order(),
                },
                timings,
                axis,
                profile,
                reprofiled,
                orientation,
                angle_filter,
                neck,
                offset,
                combine,
                rotation,
            },
        };
        for line in report.summary_lines() {
            info!("{line}");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::PointOrder;
    use crate::synthetic::cone_contour;
    use nalgebra::Point3;

    #[test]
    fn unordered_cloud_is_refused() {
        let cloud = PointCloud::new(cone_contour(200, 1.0, 0.1), PointOrder::Unordered);
        let err = TaperAnalyzer::default().analyze(&cloud).unwrap_err();
        assert_eq!(err, AnalysisError::NotContourOrdered);
    }

    #[test]
    fn tiny_cloud_is_refused_up_front() {
        let cloud = PointCloud::from_contour(cone_contour(40, 1.0, 0.1));
        assert!(matches!(
            TaperAnalyzer::default().analyze(&cloud),
            Err(AnalysisError::CloudTooSmall {
                component: "analyzer",
                min: 62,
                ..
            })
        ));
    }

    #[test]
    fn invalid_params_are_refused() {
        let mut params = AnalysisParams::default();
        params.offset.distance = -1.0;
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        assert!(matches!(
            TaperAnalyzer::new(params).analyze(&cloud),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn oversized_step_counts_from_json_are_refused() {
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        for json in [
            r#"{"profile":{"granularity":9223372036854775808}}"#,
            r#"{"profile":{"neighborExclusion":9223372036854775808}}"#,
        ] {
            let params: AnalysisParams = serde_json::from_str(json).unwrap();
            let analyzer = TaperAnalyzer::new(params);
            assert!(
                matches!(analyzer.analyze(&cloud), Err(AnalysisError::InvalidParameter { .. })),
                "{json}"
            );
            assert!(analyzer.min_cloud_len() >= 62);
        }
    }

    #[test]
    fn reversed_cone_is_reprofiled_from_the_tip() {
        // Shift indices so the wide end sits at index 0.
        let mut pts = cone_contour(200, 1.0, 0.1);
        pts.rotate_left(100);
        let cloud = PointCloud::from_contour(pts);
        let report = TaperAnalyzer::default()
            .analyze_with_diagnostics(&cloud)
            .unwrap();
        let tip = cloud.points()[report.result.axis.start];
        assert!(tip.x.abs() < 1e-6, "tip should be at x = 0, got {tip:?}");
        assert_eq!(report.trace.profile.origin, report.result.axis.start);
        assert!(report.trace.orientation.swapped);
        assert!(report.trace.reprofiled);
    }

    #[test]
    fn pose_matches_the_report() {
        let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
        let analyzer = TaperAnalyzer::default();
        let pose = analyzer.analyze(&cloud).unwrap();
        let report = analyzer.analyze_with_diagnostics(&cloud).unwrap();
        assert_eq!(pose, report.result.pose);
        assert!(report.trace.timings.stage_ms("pose").is_some());
        let mid: Point3<f32> = pose.position;
        assert!(mid.x > 0.0 && mid.x < 1.0);
    }
}
