//! On-disk record formats.

use serde::{Deserialize, Serialize};

/// The whole network as stored on disk.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NetworkRecords {
    #[serde(default)]
    pub stops: Vec<StopRecord>,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
    #[serde(default)]
    pub segments: Vec<SegmentRecord>,
}

/// A bus stop record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopRecord {
    pub id: u32,
    pub name_en: String,
    pub name_mm: String,
    #[serde(default)]
    pub road_name_en: Option<String>,
    #[serde(default)]
    pub road_name_mm: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// A bus line record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LineRecord {
    pub id: u32,
    pub line_number: i32,
    #[serde(default)]
    pub description: String,
}

/// A route segment record: `stop_id` is at position `order` on `line_id`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentRecord {
    pub line_id: u32,
    pub stop_id: u32,
    pub order: i32,
}
