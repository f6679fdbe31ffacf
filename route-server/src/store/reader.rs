//! Read interface over network data.

use std::collections::HashSet;

use crate::domain::{Line, LineId, Segment, Stop, StopId};

/// Read-only access to stops, lines and segments.
///
/// This abstraction allows the planner to be tested with in-memory data.
/// All reads through one reader must see the same network state.
pub trait NetworkReader {
    /// All stops, ordered by id.
    fn stops(&self) -> &[Stop];

    /// All lines, ordered by line number.
    fn lines(&self) -> &[Line];

    /// All segments, grouped by line and ordered by `order` within a line.
    fn segments(&self) -> &[Segment];

    fn stop(&self, id: StopId) -> Option<&Stop>;

    fn line(&self, id: LineId) -> Option<&Line>;

    /// Segments of one line, ordered by `order`.
    fn line_segments(&self, line: LineId) -> &[Segment];

    /// Look up a line by its public number.
    fn line_by_number(&self, number: i32) -> Option<&Line> {
        self.lines().iter().find(|l| l.number == number)
    }

    /// Lines with at least one segment at `stop`, ordered by line number.
    fn lines_serving(&self, stop: StopId) -> Vec<&Line> {
        let ids: HashSet<LineId> = self
            .segments()
            .iter()
            .filter(|s| s.stop == stop)
            .map(|s| s.line)
            .collect();

        self.lines()
            .iter()
            .filter(|l| ids.contains(&l.id))
            .collect()
    }

    /// Lines serving both stops, ordered by line number.
    fn lines_serving_both(&self, a: StopId, b: StopId) -> Vec<&Line> {
        let serving_b: HashSet<LineId> = self.lines_serving(b).iter().map(|l| l.id).collect();

        self.lines_serving(a)
            .into_iter()
            .filter(|l| serving_b.contains(&l.id))
            .collect()
    }
}
