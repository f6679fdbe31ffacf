//! Validated in-memory network data.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::domain::{Coordinate, DomainError, Line, LineId, Segment, Stop, StopId};

use super::error::StoreError;
use super::reader::NetworkReader;
use super::records::NetworkRecords;

/// An immutable, validated snapshot of the bus network.
///
/// Construction checks referential integrity and the uniqueness rules of
/// the data model, so readers never see dangling ids or ambiguous orders.
#[derive(Debug, Clone, Default)]
pub struct NetworkData {
    /// Sorted by id.
    stops: Vec<Stop>,
    stop_index: HashMap<StopId, usize>,

    /// Sorted by line number.
    lines: Vec<Line>,
    line_index: HashMap<LineId, usize>,

    /// Sorted by (line, order).
    segments: Vec<Segment>,
    line_ranges: HashMap<LineId, Range<usize>>,
}

impl NetworkData {
    /// Build and validate network data from domain values.
    pub fn new(
        mut stops: Vec<Stop>,
        mut lines: Vec<Line>,
        mut segments: Vec<Segment>,
    ) -> Result<Self, StoreError> {
        stops.sort_by_key(|s| s.id);
        lines.sort_by_key(|l| (l.number, l.id));
        segments.sort_by_key(|s| (s.line, s.order));

        let mut stop_index = HashMap::with_capacity(stops.len());
        let mut names_en = HashSet::new();
        let mut names_mm = HashSet::new();
        for (idx, stop) in stops.iter().enumerate() {
            if stop.name_en.trim().is_empty() && stop.name_mm.trim().is_empty() {
                return Err(DomainError::EmptyStopName(stop.id).into());
            }
            if stop_index.insert(stop.id, idx).is_some() {
                return Err(StoreError::DuplicateStop(stop.id));
            }
            if !names_en.insert((stop.name_en.clone(), stop.road_en.clone())) {
                return Err(StoreError::DuplicateStopName {
                    name: stop.name_en.clone(),
                    road: stop.road_en.clone(),
                });
            }
            if !names_mm.insert((stop.name_mm.clone(), stop.road_mm.clone())) {
                return Err(StoreError::DuplicateStopName {
                    name: stop.name_mm.clone(),
                    road: stop.road_mm.clone(),
                });
            }
        }

        let mut line_index = HashMap::with_capacity(lines.len());
        let mut numbers = HashSet::new();
        for (idx, line) in lines.iter().enumerate() {
            if line_index.insert(line.id, idx).is_some() {
                return Err(StoreError::DuplicateLine(line.id));
            }
            if !numbers.insert(line.number) {
                return Err(StoreError::DuplicateLineNumber(line.number));
            }
        }

        let mut line_ranges: HashMap<LineId, Range<usize>> = HashMap::new();
        for (idx, segment) in segments.iter().enumerate() {
            if !line_index.contains_key(&segment.line) {
                return Err(StoreError::UnknownLine(segment.line));
            }
            if !stop_index.contains_key(&segment.stop) {
                return Err(StoreError::UnknownStop {
                    line: segment.line,
                    stop: segment.stop,
                });
            }
            if idx > 0 {
                let prev = &segments[idx - 1];
                if prev.line == segment.line && prev.order == segment.order {
                    return Err(StoreError::DuplicateOrder {
                        line: segment.line,
                        order: segment.order,
                    });
                }
            }
            line_ranges
                .entry(segment.line)
                .and_modify(|r| r.end = idx + 1)
                .or_insert(idx..idx + 1);
        }

        Ok(Self {
            stops,
            stop_index,
            lines,
            line_index,
            segments,
            line_ranges,
        })
    }

    /// Build and validate network data from on-disk records.
    pub fn from_records(records: NetworkRecords) -> Result<Self, StoreError> {
        let stops = records
            .stops
            .into_iter()
            .map(|r| {
                let id = StopId(r.id);
                let coordinate = Coordinate::from_parts(id, r.latitude, r.longitude)?;
                Ok(Stop {
                    id,
                    name_en: r.name_en,
                    name_mm: r.name_mm,
                    road_en: r.road_name_en,
                    road_mm: r.road_name_mm,
                    coordinate,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let lines = records
            .lines
            .into_iter()
            .map(|r| Line::new(LineId(r.id), r.line_number, r.description))
            .collect();

        let segments = records
            .segments
            .into_iter()
            .map(|r| Segment::new(LineId(r.line_id), StopId(r.stop_id), r.order))
            .collect();

        Self::new(stops, lines, segments)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let records: NetworkRecords = serde_json::from_str(json)?;
        Self::from_records(records)
    }
}

impl NetworkReader for NetworkData {
    fn stops(&self) -> &[Stop] {
        &self.stops
    }

    fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stop_index.get(&id).map(|&idx| &self.stops[idx])
    }

    fn line(&self, id: LineId) -> Option<&Line> {
        self.line_index.get(&id).map(|&idx| &self.lines[idx])
    }

    fn line_segments(&self, line: LineId) -> &[Segment] {
        match self.line_ranges.get(&line) {
            Some(range) => &self.segments[range.clone()],
            None => &[],
        }
    }
}
