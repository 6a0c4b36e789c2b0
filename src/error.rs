//! Error type shared by every analysis stage.
//!
//! Invariant violations (bad indices, zero-length vectors, undersized clouds)
//! and search-convergence failures abort the run. Degenerate cross-sections
//! are not errors; the angle discriminator records them as invalid samples.

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("{component}: index {index} out of range for a cloud of {len} points")]
    IndexOutOfRange {
        component: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{component}: zero-length vector between points {from} and {to}")]
    ZeroLengthVector {
        component: &'static str,
        from: usize,
        to: usize,
    },

    #[error("{component}: cloud has {len} points, at least {min} required")]
    CloudTooSmall {
        component: &'static str,
        len: usize,
        min: usize,
    },

    #[error("point cloud is not contour-ordered; the analysis needs points in boundary traversal order")]
    NotContourOrdered,

    #[error("{component}: {available} usable samples, at least {required} required")]
    InsufficientSamples {
        component: &'static str,
        available: usize,
        required: usize,
    },

    #[error("neck search: no comparable neighbour at filtered index {index} (value {value})")]
    MinimumSearch { index: usize, value: f32 },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}
