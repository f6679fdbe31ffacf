//! Store error types.

use std::path::PathBuf;

use crate::domain::{DomainError, LineId, StopId};

/// Errors that can occur when loading or validating network data.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Data file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file is not valid JSON for the expected schema
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record failed domain validation
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("duplicate stop id {0}")]
    DuplicateStop(StopId),

    #[error("duplicate line id {0}")]
    DuplicateLine(LineId),

    #[error("duplicate line number {0}")]
    DuplicateLineNumber(i32),

    /// Two stops share the same (name, road) pair in one language
    #[error("duplicate stop name {name:?} with road {road:?}")]
    DuplicateStopName { name: String, road: Option<String> },

    /// A segment refers to a stop that does not exist
    #[error("segment on line {line} refers to unknown stop {stop}")]
    UnknownStop { line: LineId, stop: StopId },

    /// A segment refers to a line that does not exist
    #[error("segment refers to unknown line {0}")]
    UnknownLine(LineId),

    /// Two segments of one line share an order
    #[error("line {line} has more than one stop at order {order}")]
    DuplicateOrder { line: LineId, order: i32 },

    /// The store was built in memory and has no file to reload from
    #[error("store has no backing file to reload from")]
    NotReloadable,
}
