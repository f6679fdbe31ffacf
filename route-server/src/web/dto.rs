//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Line, Stop};
use crate::planner::{
    Itinerary, LineAtStop, LineSlice, LineStop, RouteAnnotation, RouteOutcome, SegmentDetails,
};

/// Request naming two stops, as typed by the user.
#[derive(Debug, Deserialize)]
pub struct StopPairRequest {
    /// Origin, optionally qualified: "Sule (Maha Bandula Road)"
    pub start_stop: Option<String>,

    /// Destination, same format
    pub end_stop: Option<String>,
}

/// Optional stop pair for line details.
#[derive(Debug, Deserialize)]
pub struct LineDetailsRequest {
    pub start_stop_id: Option<u32>,
    pub end_stop_id: Option<u32>,
}

/// Request naming one stop.
#[derive(Debug, Deserialize)]
pub struct StopRequest {
    pub stop: Option<String>,
}

/// A stop in responses.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub id: u32,
    pub name_en: String,
    pub name_mm: String,
    pub road_name_en: Option<String>,
    pub road_name_mm: Option<String>,

    /// "Name (Road)" as shown to users
    pub display_name: String,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A stop on a line, with its position.
#[derive(Debug, Serialize)]
pub struct LineStopResult {
    #[serde(flatten)]
    pub stop: StopResult,
    pub order: i32,
}

/// A line in responses.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub id: u32,
    pub line_number: i32,
    pub description: String,
}

/// An annotated stretch of one line.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub line_number: i32,
    pub start_stop: StopResult,
    pub end_stop: StopResult,
    pub stops: Vec<LineStopResult>,
    pub stop_count: usize,

    /// Road distance; absent when unavailable
    pub distance_km: Option<f64>,

    /// Travel time; absent when unavailable
    pub duration_mins: Option<f64>,
}

/// Response for a route search.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteResponse {
    /// Lines that serve both stops
    Direct {
        start_stop: StopResult,
        end_stop: StopResult,
        lines: Vec<LineResult>,
    },

    /// A route with transfers
    Transfer {
        start_stop: StopResult,
        end_stop: StopResult,
        legs: Vec<SegmentResult>,
        transfers: usize,
        total_distance_km: Option<f64>,
        total_duration_mins: Option<f64>,
    },

    /// The stops are not connected
    NoRoute {
        start_stop: StopResult,
        end_stop: StopResult,
        message: String,
    },
}

/// A route search answer with the number of times the pair was searched.
#[derive(Debug, Serialize)]
pub struct RouteSearchResponse {
    #[serde(flatten)]
    pub route: RouteResponse,

    /// Searches for this (start, end) pair, this one included
    pub search_count: u64,
}

/// Stops between two stops, per line.
#[derive(Debug, Serialize)]
pub struct BetweenResponse {
    pub start_stop: StopResult,
    pub end_stop: StopResult,
    pub lines: Vec<LineSliceResult>,
}

/// One line's slice between two stops.
#[derive(Debug, Serialize)]
pub struct LineSliceResult {
    pub line_number: i32,
    pub stops: Vec<LineStopResult>,
}

/// All lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// Stop names for autocomplete.
#[derive(Debug, Serialize)]
pub struct StopNameResult {
    pub name_en: String,
    pub name_mm: String,
    pub road_name_en: Option<String>,
    pub road_name_mm: Option<String>,
}

/// Lines serving one stop.
#[derive(Debug, Serialize)]
pub struct StopLinesResponse {
    pub stop: StopResult,
    pub lines: Vec<StopLineResult>,
}

/// A line serving a stop, summarised over its full length.
#[derive(Debug, Serialize)]
pub struct StopLineResult {
    pub line_number: i32,
    pub stop_count: usize,
    pub first_stop: String,
    pub last_stop: String,
    pub distance_km: Option<f64>,
    pub duration_mins: Option<f64>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Stop> for StopResult {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.0,
            name_en: stop.name_en.clone(),
            name_mm: stop.name_mm.clone(),
            road_name_en: stop.road_en.clone(),
            road_name_mm: stop.road_mm.clone(),
            display_name: stop.display_name(),
            latitude: stop.coordinate.map(|c| c.latitude()),
            longitude: stop.coordinate.map(|c| c.longitude()),
        }
    }
}

impl From<&Stop> for StopNameResult {
    fn from(stop: &Stop) -> Self {
        Self {
            name_en: stop.name_en.clone(),
            name_mm: stop.name_mm.clone(),
            road_name_en: stop.road_en.clone(),
            road_name_mm: stop.road_mm.clone(),
        }
    }
}

impl From<&LineStop> for LineStopResult {
    fn from(s: &LineStop) -> Self {
        Self {
            stop: StopResult::from(&s.stop),
            order: s.order,
        }
    }
}

impl From<&Line> for LineResult {
    fn from(line: &Line) -> Self {
        Self {
            id: line.id.0,
            line_number: line.number,
            description: line.description.clone(),
        }
    }
}

impl From<&SegmentDetails> for SegmentResult {
    fn from(d: &SegmentDetails) -> Self {
        Self {
            line_number: d.line.number,
            start_stop: StopResult::from(&d.from),
            end_stop: StopResult::from(&d.to),
            stops: d.stops.iter().map(LineStopResult::from).collect(),
            stop_count: d.stop_count(),
            distance_km: d.annotation.distance_km,
            duration_mins: d.annotation.duration_mins,
        }
    }
}

impl From<&LineSlice> for LineSliceResult {
    fn from(slice: &LineSlice) -> Self {
        Self {
            line_number: slice.line.number,
            stops: slice.stops.iter().map(LineStopResult::from).collect(),
        }
    }
}

impl From<&LineAtStop> for StopLineResult {
    fn from(l: &LineAtStop) -> Self {
        Self {
            line_number: l.line.number,
            stop_count: l.stop_count,
            first_stop: l.first.display_name(),
            last_stop: l.last.display_name(),
            distance_km: l.annotation.distance_km,
            duration_mins: l.annotation.duration_mins,
        }
    }
}

impl RouteResponse {
    fn transfer(itinerary: &Itinerary) -> Self {
        let RouteAnnotation {
            distance_km,
            duration_mins,
        } = itinerary.total;

        RouteResponse::Transfer {
            start_stop: StopResult::from(&itinerary.from),
            end_stop: StopResult::from(&itinerary.to),
            legs: itinerary.legs.iter().map(SegmentResult::from).collect(),
            transfers: itinerary.transfers,
            total_distance_km: distance_km,
            total_duration_mins: duration_mins,
        }
    }
}

impl From<&RouteOutcome> for RouteResponse {
    fn from(outcome: &RouteOutcome) -> Self {
        match outcome {
            RouteOutcome::Direct { from, to, lines } => RouteResponse::Direct {
                start_stop: StopResult::from(from),
                end_stop: StopResult::from(to),
                lines: lines.iter().map(LineResult::from).collect(),
            },
            RouteOutcome::Transfer(itinerary) => RouteResponse::transfer(itinerary),
            RouteOutcome::NoRoute { from, to } => RouteResponse::NoRoute {
                start_stop: StopResult::from(from),
                end_stop: StopResult::from(to),
                message: format!(
                    "No direct or transfer route found between {} and {}.",
                    from.name_en, to.name_en
                ),
            },
        }
    }
}
