//! Stop slices along a line, with distance annotation.

use serde::Serialize;
use tracing::{debug, warn};

use crate::distance::{DistanceProvider, RouteDetails};
use crate::domain::{Coordinate, Line, LineId, Segment, Stop, StopId};
use crate::store::NetworkReader;

/// A stop at its position on a line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStop {
    pub stop: Stop,
    pub order: i32,
}

/// Distance and duration of a slice; `None` means unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RouteAnnotation {
    /// Kilometers, rounded to 2 decimals
    pub distance_km: Option<f64>,
    /// Minutes, rounded to whole minutes
    pub duration_mins: Option<f64>,
}

impl RouteAnnotation {
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn from_details(details: RouteDetails) -> Self {
        Self {
            distance_km: Some(round_km(details.distance_km)),
            duration_mins: Some(details.duration_mins.round()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.distance_km.is_some() || self.duration_mins.is_some()
    }

    /// Sum the available values; a total with no contributing value stays
    /// unavailable.
    pub fn total<'a>(parts: impl IntoIterator<Item = &'a RouteAnnotation>) -> Self {
        let mut distance = None;
        let mut duration = None;
        for part in parts {
            if let Some(d) = part.distance_km {
                *distance.get_or_insert(0.0) += d;
            }
            if let Some(t) = part.duration_mins {
                *duration.get_or_insert(0.0) += t;
            }
        }
        Self {
            distance_km: distance.map(round_km),
            duration_mins: duration.map(f64::round),
        }
    }
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// An annotated stop slice of one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentDetails {
    pub line: Line,
    pub from: Stop,
    pub to: Stop,
    pub stops: Vec<LineStop>,
    pub annotation: RouteAnnotation,
}

impl SegmentDetails {
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

/// First position of `stop` in a line's ordered segments.
fn position(segments: &[Segment], stop: StopId) -> Option<usize> {
    segments.iter().position(|s| s.stop == stop)
}

/// The inclusive stop sequence from `from` to `to` along `line`.
///
/// Direction-aware: if `to` comes before `from` on the line, the slice is
/// returned in descending order, i.e. travelling against the line's
/// nominal direction. Returns `None` if either stop is not on the line.
pub fn stops_between<R: NetworkReader + ?Sized>(
    reader: &R,
    line: LineId,
    from: StopId,
    to: StopId,
) -> Option<Vec<LineStop>> {
    let segments = reader.line_segments(line);
    let start = position(segments, from)?;
    let end = position(segments, to)?;

    let slice: Vec<&Segment> = if start <= end {
        segments[start..=end].iter().collect()
    } else {
        segments[end..=start].iter().rev().collect()
    };

    slice
        .into_iter()
        .map(|s| {
            reader.stop(s.stop).map(|stop| LineStop {
                stop: stop.clone(),
                order: s.order,
            })
        })
        .collect()
}

/// Every stop of `line` in order, including repeat visits.
pub fn line_stops<R: NetworkReader + ?Sized>(reader: &R, line: LineId) -> Option<Vec<LineStop>> {
    reader
        .line_segments(line)
        .iter()
        .map(|s| {
            reader.stop(s.stop).map(|stop| LineStop {
                stop: stop.clone(),
                order: s.order,
            })
        })
        .collect()
}

/// Look up distance and duration for a stop sequence.
///
/// Stops without coordinates are skipped. With fewer than two usable
/// points the provider is not called. Provider failures are logged and
/// reported as unavailable.
pub async fn annotate<D: DistanceProvider>(provider: &D, stops: &[LineStop]) -> RouteAnnotation {
    let points: Vec<Coordinate> = stops.iter().filter_map(|s| s.stop.coordinate).collect();

    if points.len() < 2 {
        debug!(
            stops = stops.len(),
            points = points.len(),
            "Too few coordinates for distance lookup"
        );
        return RouteAnnotation::unavailable();
    }

    match provider.route_details(&points).await {
        Ok(details) => RouteAnnotation::from_details(details),
        Err(e) => {
            warn!(
                error = %e,
                timeout = e.is_timeout(),
                points = points.len(),
                "Distance lookup failed, reporting unavailable"
            );
            RouteAnnotation::unavailable()
        }
    }
}

/// Extract and annotate the slice of `line` between two stops.
pub async fn extract_segment<R, D>(
    reader: &R,
    provider: &D,
    line: &Line,
    from: StopId,
    to: StopId,
) -> Option<SegmentDetails>
where
    R: NetworkReader + ?Sized,
    D: DistanceProvider,
{
    let stops = stops_between(reader, line.id, from, to)?;
    let first = stops.first()?.stop.clone();
    let last = stops.last()?.stop.clone();

    let annotation = annotate(provider, &stops).await;

    Some(SegmentDetails {
        line: line.clone(),
        from: first,
        to: last,
        stops,
        annotation,
    })
}

/// Annotate a whole line, first stop to last.
///
/// Returns `None` for a line without segments.
pub async fn extract_line<R, D>(reader: &R, provider: &D, line: &Line) -> Option<SegmentDetails>
where
    R: NetworkReader + ?Sized,
    D: DistanceProvider,
{
    let stops = line_stops(reader, line.id)?;
    let first = stops.first()?.stop.clone();
    let last = stops.last()?.stop.clone();

    let annotation = annotate(provider, &stops).await;

    Some(SegmentDetails {
        line: line.clone(),
        from: first,
        to: last,
        stops,
        annotation,
    })
}
