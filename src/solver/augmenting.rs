//! Shortest-augmenting-path max flow.
//!
//! Each round runs one breadth-first search from the source over edges
//! with positive residual capacity, recording for every reached node the
//! edge used to get there and the bottleneck residual seen so far. The
//! search stops the moment it reaches the sink; the bottleneck flow is
//! then pushed backwards along the recorded predecessor edges. Rounds
//! repeat until a search fails to reach the sink.

use std::collections::VecDeque;

use crate::error::Result;
use crate::graph::{FlowNetwork, NodeId, FLOW_EPSILON};

use super::{check_terminals, MaxFlowSolve};

/// BFS augmenting-path solver (Edmonds-Karp).
#[derive(Debug, Default)]
pub struct ShortestAugmentingPath {
    // predecessor edge of each reached node: (owner node, index in its list)
    parent: Vec<Option<(NodeId, usize)>>,
    visited: Vec<bool>,
}

impl ShortestAugmentingPath {
    /// Create a solver; scratch buffers grow on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// One BFS round. Returns the bottleneck of a source-to-sink path, or
    /// 0.0 when the sink is unreachable in the residual graph.
    fn find_path(&mut self, network: &FlowNetwork, source: NodeId, sink: NodeId) -> f64 {
        let n = network.node_count();
        self.parent.clear();
        self.parent.resize(n, None);
        self.visited.clear();
        self.visited.resize(n, false);
        self.visited[source] = true;

        let mut queue = VecDeque::new();
        queue.push_back((source, f64::INFINITY));
        while let Some((u, bottleneck)) = queue.pop_front() {
            for (i, edge) in network.edges(u).iter().enumerate() {
                if self.visited[edge.to] || edge.residual() <= FLOW_EPSILON {
                    continue;
                }
                self.visited[edge.to] = true;
                self.parent[edge.to] = Some((u, i));
                let next = bottleneck.min(edge.residual());
                if edge.to == sink {
                    return next;
                }
                queue.push_back((edge.to, next));
            }
        }
        0.0
    }
}

impl MaxFlowSolve for ShortestAugmentingPath {
    fn solve(&mut self, network: &mut FlowNetwork, source: NodeId, sink: NodeId) -> Result<f64> {
        check_terminals(network, source, sink)?;
        let mut total = 0.0;
        let mut rounds = 0usize;
        loop {
            let pushed = self.find_path(network, source, sink);
            if pushed <= FLOW_EPSILON {
                break;
            }
            // Walk the recorded predecessor edges back from the sink
            let mut v = sink;
            while v != source {
                let (u, i) = self.parent[v].expect("augmenting path reaches back to the source");
                network.push_flow(u, i, pushed);
                v = u;
            }
            total += pushed;
            rounds += 1;
        }
        if !total.is_finite() {
            return Err(crate::error::SegmentError::InvariantViolation(format!(
                "flow value became non-finite: {total}"
            )));
        }
        tracing::debug!(rounds, max_flow = total, "augmenting-path solver finished");
        Ok(total)
    }
}
