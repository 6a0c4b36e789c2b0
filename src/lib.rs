#![doc = include_str!("../README.md")]

// Pipeline entry point and shared types
pub mod analyzer;
pub mod cloud;
pub mod diagnostics;
pub mod error;

// Individual stages, public so tools can run them in isolation.
pub mod angle;
pub mod axis;
pub mod combine;
pub mod discriminator;
pub mod geometry;
pub mod neck;
pub mod offset;
pub mod orientation;
pub mod pose;
pub mod profile;

// Tooling
pub mod config;
pub mod io;
pub mod synthetic;

// --- High-level re-exports -------------------------------------------------

pub use crate::analyzer::{
    AnalysisParams, AngleFilterParams, AxisParams, CombineParams, NeckSearchParams, OffsetParams,
    PoseParams, ProfileParams, TaperAnalyzer,
};
pub use crate::cloud::{PointCloud, PointOrder};
pub use crate::combine::{CutPair, CutSource};
pub use crate::diagnostics::{AnalysisReport, AnalysisTrace, CutResult};
pub use crate::error::{AnalysisError, Result};
pub use crate::pose::Pose;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use taper_cut::prelude::*;
/// use taper_cut::synthetic::cone_contour;
///
/// let cloud = PointCloud::from_contour(cone_contour(200, 1.0, 0.1));
/// let pose = TaperAnalyzer::new(AnalysisParams::default())
///     .analyze(&cloud)
///     .expect("cone is a valid input");
/// println!("pose = {:?}", pose.to_array());
/// ```
pub mod prelude {
    pub use crate::{AnalysisParams, PointCloud, PointOrder, Pose, TaperAnalyzer};
}
