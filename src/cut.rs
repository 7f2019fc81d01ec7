//! Cut extraction from the solved residual graph.
//!
//! After the solver halts, the nodes still reachable from the source
//! through positive-residual edges form the source side of a minimum cut
//! (max-flow/min-cut duality). Pixel nodes in that set are foreground.
//! Extraction is read-only and idempotent.

use std::collections::VecDeque;

use crate::graph::{FlowNetwork, NodeId, FLOW_EPSILON};
use crate::image::MaskBuffer;

/// Nodes reachable from `source` through strictly positive residuals.
pub fn reachable_from_source(network: &FlowNetwork, source: NodeId) -> Vec<bool> {
    let mut reachable = vec![false; network.node_count()];
    reachable[source] = true;
    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(u) = queue.pop_front() {
        for edge in network.edges(u) {
            if !reachable[edge.to] && edge.residual() > FLOW_EPSILON {
                reachable[edge.to] = true;
                queue.push_back(edge.to);
            }
        }
    }
    reachable
}

/// Sum of forward capacities crossing from the reachable set to its
/// complement. Equals the max-flow value on a solved network.
pub fn cut_capacity(network: &FlowNetwork, reachable: &[bool]) -> f64 {
    let mut total = 0.0;
    for u in 0..network.node_count() {
        if !reachable[u] {
            continue;
        }
        for edge in network.edges(u) {
            if !reachable[edge.to] {
                total += edge.capacity;
            }
        }
    }
    total
}

/// Label the pixel nodes of the reachable set as foreground.
///
/// Only the first `width * height` entries of `reachable` are pixels; the
/// two terminal ids beyond them are ignored.
pub fn mask_from_reachable(reachable: &[bool], width: usize, height: usize) -> MaskBuffer {
    let mut mask = MaskBuffer::new(width, height);
    for r in 0..height {
        for c in 0..width {
            if reachable[r * width + c] {
                mask.set_foreground(r, c);
            }
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{BlockingFlow, MaxFlowSolve};

    fn solved_line() -> (FlowNetwork, NodeId) {
        let mut net = FlowNetwork::new(3);
        net.add_edge(0, 1, 5.0);
        net.add_edge(1, 2, 10.0);
        BlockingFlow::new().solve(&mut net, 0, 2).unwrap();
        (net, 0)
    }

    #[test]
    fn test_reachable_stops_at_saturated_edge() {
        let (net, source) = solved_line();
        let reachable = reachable_from_source(&net, source);
        assert_eq!(reachable, vec![true, false, false]);
    }

    #[test]
    fn test_cut_capacity_equals_flow() {
        let (net, source) = solved_line();
        let reachable = reachable_from_source(&net, source);
        assert!((cut_capacity(&net, &reachable) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_extraction_is_idempotent_and_pure() {
        let (net, source) = solved_line();
        let first = reachable_from_source(&net, source);
        let second = reachable_from_source(&net, source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mask_from_reachable() {
        // 2x2 pixel layout with pixels 0 and 2 on the source side
        let reachable = vec![true, false, true, false, true, false];
        let mask = mask_from_reachable(&reachable, 2, 2);
        assert!(mask.is_foreground(0, 0));
        assert!(!mask.is_foreground(0, 1));
        assert!(mask.is_foreground(1, 0));
        assert!(!mask.is_foreground(1, 1));
        assert_eq!(mask.foreground_count(), 2);
    }
}
