//! Analysis pipeline: parameters and the [`TaperAnalyzer`] driver.

pub mod params;
mod pipeline;

pub use params::{
    AnalysisParams, AngleFilterParams, AxisParams, CombineParams, NeckSearchParams, OffsetParams,
    PoseParams, ProfileParams,
};
pub use pipeline::TaperAnalyzer;
