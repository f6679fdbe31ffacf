//! Bus route planner.
//!
//! This module answers "how do I get from this stop to that one?":
//!
//! 1. Resolve the typed stop names to stops
//! 2. If some line serves both stops, report those lines
//! 3. Otherwise search the line graph for the path with the fewest
//!    transfers
//! 4. Split the path into one leg per line ridden and annotate each leg
//!    with road distance and travel time
//!
//! Route choice uses only the network topology. Distances are looked up
//! after the path is fixed, and a failed lookup never fails a query.

mod assemble;
mod error;
mod graph;
mod path;
mod resolve;
mod segment;

#[cfg(test)]
mod assemble_tests;

pub use assemble::{Itinerary, LineAtStop, LineSlice, RouteOutcome, RoutePlanner};
pub use error::PlanError;
pub use graph::{Edge, NetworkGraph};
pub use path::{PathLeg, shortest_path, transfer_count};
pub use resolve::{StopQuery, resolve_stop};
pub use segment::{
    LineStop, RouteAnnotation, SegmentDetails, annotate, extract_line, extract_segment,
    line_stops, stops_between,
};
