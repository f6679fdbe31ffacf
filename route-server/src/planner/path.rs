//! Fewest-transfer path search.
//!
//! Uniform-cost search over (stop, current line) states. Riding along the
//! current line is free; boarding a different line costs one transfer. The
//! first line boarded is free, so a direct ride costs zero.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{LineId, StopId};

use super::graph::{Edge, NetworkGraph};

/// One line-continuous part of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PathLeg {
    pub start: StopId,
    pub end: StopId,
    pub line: LineId,
    pub line_number: i32,
}

/// Number of transfers for a leg sequence.
pub fn transfer_count(legs: &[PathLeg]) -> usize {
    legs.len().saturating_sub(1)
}

/// Search state: where we are and which line we are riding.
type StateKey = (StopId, Option<LineId>);

/// Priority queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    cost: u32,
    stop: StopId,
    /// (line number, line) of the line being ridden, if any.
    line: Option<(i32, LineId)>,
}

impl QueueEntry {
    fn key(&self) -> StateKey {
        (self.stop, self.line.map(|(_, id)| id))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; ties broken by stop id, then line number
        (other.cost, other.stop, other.line).cmp(&(self.cost, self.stop, self.line))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a path from `start` to `end` with the fewest line changes.
///
/// Returns `Some(vec![])` when `start == end`, and `None` when the stops
/// are not connected. Consecutive steps on the same line are merged, so no
/// two adjacent legs share a line.
pub fn shortest_path(graph: &NetworkGraph, start: StopId, end: StopId) -> Option<Vec<PathLeg>> {
    if start == end {
        return Some(Vec::new());
    }
    if !graph.contains(start) || !graph.contains(end) {
        debug!(%start, %end, "Stop is not served by any line");
        return None;
    }

    let origin: StateKey = (start, None);
    let mut best: HashMap<StateKey, u32> = HashMap::new();
    let mut predecessors: HashMap<StateKey, (StateKey, Edge)> = HashMap::new();
    let mut queue = BinaryHeap::new();

    best.insert(origin, 0);
    queue.push(QueueEntry {
        cost: 0,
        stop: start,
        line: None,
    });

    let mut reached = None;
    let mut popped = 0usize;

    while let Some(entry) = queue.pop() {
        popped += 1;
        let key = entry.key();

        if best.get(&key).is_some_and(|&b| entry.cost > b) {
            continue;
        }

        if entry.stop == end {
            reached = Some((key, entry.cost));
            break;
        }

        for edge in graph.neighbors(entry.stop) {
            let transfer = match key.1 {
                Some(current) if current != edge.line => 1,
                _ => 0,
            };
            let cost = entry.cost + transfer;
            let next: StateKey = (edge.to, Some(edge.line));

            if best.get(&next).is_none_or(|&b| cost < b) {
                best.insert(next, cost);
                predecessors.insert(next, (key, *edge));
                queue.push(QueueEntry {
                    cost,
                    stop: edge.to,
                    line: Some((edge.line_number, edge.line)),
                });
            }
        }
    }

    let Some((target, transfers)) = reached else {
        debug!(%start, %end, popped, "No path between stops");
        return None;
    };

    let legs = reconstruct(&predecessors, origin, target)?;
    debug!(%start, %end, transfers, legs = legs.len(), popped, "Found path");

    Some(legs)
}

/// Walk predecessors back from `target` to `origin`, merging steps that
/// stay on the same line.
fn reconstruct(
    predecessors: &HashMap<StateKey, (StateKey, Edge)>,
    origin: StateKey,
    target: StateKey,
) -> Option<Vec<PathLeg>> {
    let mut legs: Vec<PathLeg> = Vec::new();
    let mut current = target;

    // Each step moves to a strictly earlier state, so the chain cannot be
    // longer than the table.
    for _ in 0..=predecessors.len() {
        if current == origin {
            legs.reverse();
            return Some(legs);
        }

        let Some(&(prev, edge)) = predecessors.get(&current) else {
            warn!(stop = %current.0, "Missing predecessor while rebuilding path");
            return None;
        };

        match legs.last_mut() {
            Some(leg) if leg.line == edge.line => leg.start = prev.0,
            _ => legs.push(PathLeg {
                start: prev.0,
                end: current.0,
                line: edge.line,
                line_number: edge.line_number,
            }),
        }

        current = prev;
    }

    warn!(stop = %target.0, "Predecessor chain does not reach the origin");
    None
}
