//! Bus network graph.
//!
//! Nodes are stops. Every pair of order-adjacent stops on a line is joined
//! by an undirected edge tagged with that line, so two stops served by
//! several lines are joined by several parallel edges.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{LineId, StopId};
use crate::store::NetworkReader;

/// A directed half of an undirected line edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: StopId,
    pub line: LineId,
    pub line_number: i32,
}

/// Adjacency list of the bus network.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    adjacency: HashMap<StopId, Vec<Edge>>,
}

impl NetworkGraph {
    /// Build the graph from the current network.
    ///
    /// Neighbor lists are sorted by (line number, neighbor id) so that
    /// traversal order does not depend on storage order.
    pub fn build<R: NetworkReader + ?Sized>(reader: &R) -> Self {
        let mut adjacency: HashMap<StopId, Vec<Edge>> = HashMap::new();

        for line in reader.lines() {
            let segments = reader.line_segments(line.id);

            for pair in segments.windows(2) {
                let (a, b) = (pair[0].stop, pair[1].stop);
                adjacency.entry(a).or_default().push(Edge {
                    to: b,
                    line: line.id,
                    line_number: line.number,
                });
                adjacency.entry(b).or_default().push(Edge {
                    to: a,
                    line: line.id,
                    line_number: line.number,
                });
            }
        }

        for edges in adjacency.values_mut() {
            edges.sort_by_key(|e| (e.line_number, e.to));
            edges.dedup();
        }

        debug!(
            stops = adjacency.len(),
            edges = adjacency.values().map(Vec::len).sum::<usize>() / 2,
            "Built network graph"
        );

        Self { adjacency }
    }

    /// Edges leaving `stop`.
    pub fn neighbors(&self, stop: StopId) -> &[Edge] {
        self.adjacency.get(&stop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stops with at least one edge.
    pub fn stop_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn contains(&self, stop: StopId) -> bool {
        self.adjacency.contains_key(&stop)
    }
}
