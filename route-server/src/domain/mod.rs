//! Domain types for the bus route planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod error;
mod line;
mod segment;
mod stop;

pub use error::DomainError;
pub use line::{Line, LineId};
pub use segment::Segment;
pub use stop::{Coordinate, Stop, StopId};
