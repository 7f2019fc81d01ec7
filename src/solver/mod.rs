//! Max-flow strategies.
//!
//! Two interchangeable solvers share one contract: mutate edge flows on a
//! [`FlowNetwork`] until no augmenting path remains and return the total
//! flow. Either way the residual set reachable from the source afterwards
//! is a minimum cut; the two may leave different per-edge flows when ties
//! exist, but never different flow values.

use crate::error::Result;
use crate::graph::{FlowNetwork, NodeId};

mod augmenting;
mod blocking;

pub use augmenting::ShortestAugmentingPath;
pub use blocking::BlockingFlow;

/// Common contract of the max-flow strategies.
pub trait MaxFlowSolve {
    /// Push flow from `source` to `sink` until no augmenting path exists;
    /// return the total flow value.
    fn solve(&mut self, network: &mut FlowNetwork, source: NodeId, sink: NodeId) -> Result<f64>;
}

pub(crate) fn check_terminals(
    network: &FlowNetwork,
    source: NodeId,
    sink: NodeId,
) -> Result<()> {
    use crate::error::SegmentError;
    let n = network.node_count();
    if source >= n || sink >= n || source == sink {
        return Err(SegmentError::InvalidInput(format!(
            "terminals source={source} sink={sink} invalid for {n} nodes"
        )));
    }
    Ok(())
}
