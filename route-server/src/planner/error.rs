//! Planner error types.

use crate::domain::StopId;

/// Error from a planner query.
///
/// "No route" is not an error; see [`super::RouteOutcome::NoRoute`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// No stop matches the given name or id
    #[error("stop not found: {0}")]
    StopNotFound(String),

    /// No line has this number
    #[error("line {0} not found")]
    LineNotFound(i32),

    /// The stop exists but the line does not visit it
    #[error("line {line} does not serve stop {stop}")]
    StopNotOnLine { line: i32, stop: StopId },

    /// The line has no segments
    #[error("line {0} has no stops")]
    EmptyLine(i32),
}
