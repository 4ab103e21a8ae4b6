//! Error types for isoblob.

use thiserror::Error;

/// The main error type for isoblob operations.
///
/// Only scene construction can fail. Ray queries never return errors: degenerate
/// inputs produce empty results instead.
#[derive(Error, Debug)]
pub enum IsoblobError {
    /// The iso-surface threshold must be finite and strictly positive.
    #[error("threshold must be finite and > 0, got {0}")]
    InvalidThreshold(f64),

    /// The coarse marching step must be finite and strictly positive.
    #[error("coarse step must be finite and > 0, got {0}")]
    InvalidCoarseStep(f64),

    /// The refinement tolerance must be positive and smaller than the coarse step.
    #[error("refinement tolerance {tolerance} must lie in (0, coarse step {coarse_step})")]
    InvalidTolerance { tolerance: f64, coarse_step: f64 },

    /// A metaball bounding radius must be finite and strictly positive.
    #[error("metaball radius must be finite and > 0, got {0}")]
    InvalidRadius(f64),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for isoblob operations.
pub type Result<T> = std::result::Result<T, IsoblobError>;
