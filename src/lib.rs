//! # rucut
//!
//! Interactive binary image segmentation on a max-flow/min-cut solver.
//!
//! An image plus a small amount of seed information (hard
//! foreground/background regions, or an intensity bias) is mapped onto a
//! flow network: one node per pixel, two terminals, contrast-sensitive
//! N-links between neighbors and data-term T-links to the terminals. A
//! minimum cut of that network is a segmentation that balances the
//! pairwise smoothness penalty against the per-pixel data cost; the cut
//! is reported as a binary mask.
//!
//! Pipeline: [`PixelBuffer`] + [`SegmentConfig`] -> [`GraphBuilder`](builder::GraphBuilder)
//! -> [`FlowNetwork`] -> max-flow solver (mutates flows in place) ->
//! residual-reachability cut extraction -> [`MaskBuffer`].
//!
//! Two interchangeable solvers are provided: [`ShortestAugmentingPath`]
//! (repeated BFS) and [`BlockingFlow`] (level graphs with resumption
//! pointers, the default). Both leave the network in a state where the
//! residual set reachable from the source is a minimum cut.
//!
//! The engine performs no file I/O, owns no cross-frame state, and
//! computes one static cut per invocation, synchronously.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod cut;
pub mod error;
pub mod graph;
pub mod image;
pub mod model;
pub mod seeds;
pub mod segment;
pub mod solver;
pub mod witness;

// Re-exports for convenience
pub use config::{SegmentConfig, SolverKind};
pub use error::{Result, SegmentError};
pub use graph::{FlowEdge, FlowNetwork, NodeId, FLOW_EPSILON};
pub use image::{MaskBuffer, PixelBuffer, MASK_FOREGROUND};
pub use seeds::{SeedLabel, SeedPolicy};
pub use segment::{segment, Segmentation};
pub use solver::{BlockingFlow, MaxFlowSolve, ShortestAugmentingPath};

/// Version of the rucut library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
