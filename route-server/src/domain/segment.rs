//! Route segments: a stop's position on a line.

use serde::Serialize;

use super::{LineId, StopId};

/// One stop of a line at an order position.
///
/// A line's segments sorted by `order` form its canonical stop sequence.
/// Within a line no two segments share an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub line: LineId,
    pub stop: StopId,
    pub order: i32,
}

impl Segment {
    pub fn new(line: LineId, stop: StopId, order: i32) -> Self {
        Self { line, stop, order }
    }
}
