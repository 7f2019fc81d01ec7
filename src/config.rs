//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};
use crate::seeds::SeedPolicy;

/// Max-flow strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverKind {
    /// Repeated shortest augmenting paths found by BFS.
    ShortestAugmentingPath,
    /// Blocking flow over level graphs with resumption pointers.
    BlockingFlow,
}

/// Configuration for one segmentation solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Cap on the longer image side before graph construction; larger
    /// images are downscaled to fit and the mask is scaled back up.
    pub max_dimension: usize,
    /// Weight of the data term relative to the smoothness term.
    pub lambda_data: f64,
    /// Smoothness constant `K1` multiplying every N-link weight.
    pub smoothness_scale: f64,
    /// Capacity of hard terminal links on seeded pixels. Only its
    /// magnitude relative to `lambda_data` and `smoothness_scale` matters.
    pub hard_link_capacity: f64,
    /// Rule tagging each pixel foreground seed / background seed / unknown.
    pub seed_policy: SeedPolicy,
    /// Which max-flow strategy to run.
    pub solver: SolverKind,
    /// Whether to emit a JSONL witness entry for the solve.
    pub witness_enabled: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            max_dimension: 100,
            lambda_data: 10.0,
            smoothness_scale: 50.0,
            hard_link_capacity: 1e9,
            seed_policy: SeedPolicy::default(),
            solver: SolverKind::BlockingFlow,
            witness_enabled: false,
        }
    }
}

impl SegmentConfig {
    /// Reject configurations that would produce an ill-formed network.
    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 {
            return Err(SegmentError::InvalidInput(
                "max_dimension must be at least 1".into(),
            ));
        }
        for (name, value) in [
            ("lambda_data", self.lambda_data),
            ("smoothness_scale", self.smoothness_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SegmentError::InvalidInput(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.hard_link_capacity.is_finite() || self.hard_link_capacity <= 0.0 {
            return Err(SegmentError::InvalidInput(format!(
                "hard_link_capacity must be finite and positive, got {}",
                self.hard_link_capacity
            )));
        }
        Ok(())
    }
}
