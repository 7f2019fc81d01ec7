//! Error types for rucut
//!
//! This module defines the error hierarchy for the crate. Degenerate
//! statistics (empty seed sets, zero variance) are handled by documented
//! fallbacks and never surface here.

use thiserror::Error;

/// Result type alias for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentError>;

/// Main error type for rucut
#[derive(Error, Debug)]
pub enum SegmentError {
    /// Invalid image buffer or configuration, rejected before graph construction
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A programming invariant was violated (negative or NaN capacity/flow)
    #[error("Internal invariant violation: {0}")]
    InvariantViolation(String),

    /// The blocking-flow solver exceeded its defensive phase cap
    #[error("Solver did not converge within {phases} level-graph phases")]
    DidNotConverge {
        /// Number of level-graph phases completed before giving up
        phases: usize,
    },
}
