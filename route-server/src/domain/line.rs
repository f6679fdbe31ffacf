//! Bus line types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a bus line record.
///
/// Distinct from the public line number printed on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u32);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bus line, e.g. YBS 36.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub id: LineId,
    /// Public line number, unique across lines.
    pub number: i32,
    pub description: String,
}

impl Line {
    pub fn new(id: LineId, number: i32, description: impl Into<String>) -> Self {
        Self {
            id,
            number,
            description: description.into(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}
