//! Network data store.
//!
//! Stops, lines and segments are loaded from a JSON document, validated,
//! and served to the planner as immutable snapshots. A snapshot is taken
//! once per request, so a request always sees a consistent network even
//! if the store is reloaded concurrently.

mod data;
mod error;
mod file;
mod reader;
mod records;

pub use data::NetworkData;
pub use error::StoreError;
pub use file::NetworkStore;
pub use reader::NetworkReader;
pub use records::{LineRecord, NetworkRecords, SegmentRecord, StopRecord};
