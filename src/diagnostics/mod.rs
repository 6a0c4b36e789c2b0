//! Structured diagnostics produced alongside the cut pose.
//!
//! [`AnalysisReport`] is what [`crate::TaperAnalyzer::analyze_with_diagnostics`]
//! returns: the compact [`CutResult`] plus an [`AnalysisTrace`] holding one
//! record per stage. The overlay submodule turns a report into line segments
//! for an external viewer.

pub mod overlay;
pub mod report;
pub mod timing;

pub use overlay::{overlay_segments, resolve_segments, OverlayLine, OverlaySegment, SegmentKind};
pub use report::{AnalysisReport, AnalysisTrace, CutResult, InputDescriptor};
pub use timing::{StageClock, StageTiming, TimingBreakdown};
