//! Route assembly.
//!
//! Combines name resolution, the direct-line check, the fewest-transfer
//! search and segment extraction into the answers the web layer serves.

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::distance::DistanceProvider;
use crate::domain::{Line, Stop, StopId};
use crate::store::NetworkReader;

use super::error::PlanError;
use super::graph::NetworkGraph;
use super::path::{PathLeg, shortest_path, transfer_count};
use super::resolve::{StopQuery, resolve_stop};
use super::segment::{
    LineStop, RouteAnnotation, SegmentDetails, extract_line, extract_segment, stops_between,
};

/// A multi-leg journey with per-leg details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub from: Stop,
    pub to: Stop,
    pub legs: Vec<SegmentDetails>,
    /// Sum of the legs that had values
    pub total: RouteAnnotation,
    pub transfers: usize,
}

/// The answer to a route query.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// One or more lines serve both stops; no path search was needed.
    Direct {
        from: Stop,
        to: Stop,
        lines: Vec<Line>,
    },
    /// A path found by the transfer search.
    Transfer(Itinerary),
    /// The stops are not connected.
    NoRoute { from: Stop, to: Stop },
}

/// The stops between two stops on one line that serves both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSlice {
    pub line: Line,
    pub stops: Vec<LineStop>,
}

/// A line serving a stop, summarised over its full length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineAtStop {
    pub line: Line,
    pub stop_count: usize,
    pub first: Stop,
    pub last: Stop,
    pub annotation: RouteAnnotation,
}

/// Route planner over one network snapshot.
///
/// All reads go through the same reader, so a single query never mixes
/// data from before and after a reload.
pub struct RoutePlanner<'a, R: NetworkReader + ?Sized, D> {
    reader: &'a R,
    provider: &'a D,
}

impl<'a, R, D> RoutePlanner<'a, R, D>
where
    R: NetworkReader + ?Sized,
    D: DistanceProvider,
{
    pub fn new(reader: &'a R, provider: &'a D) -> Self {
        Self { reader, provider }
    }

    /// Resolve a stop query, failing with [`PlanError::StopNotFound`].
    pub fn resolve(&self, query: &StopQuery) -> Result<&'a Stop, PlanError> {
        resolve_stop(self.reader, query).ok_or_else(|| PlanError::StopNotFound(query.to_string()))
    }

    fn stop(&self, id: StopId) -> Result<&'a Stop, PlanError> {
        self.reader
            .stop(id)
            .ok_or_else(|| PlanError::StopNotFound(id.to_string()))
    }

    /// Plan a route between two named stops.
    pub async fn plan_by_name(
        &self,
        from: &StopQuery,
        to: &StopQuery,
    ) -> Result<RouteOutcome, PlanError> {
        let from = self.resolve(from)?;
        let to = self.resolve(to)?;
        self.plan(from.id, to.id).await
    }

    /// Plan a route between two stops.
    ///
    /// Lines serving both stops are reported directly. Otherwise the
    /// fewest-transfer path is searched and each leg is annotated with
    /// distance and duration.
    pub async fn plan(&self, from: StopId, to: StopId) -> Result<RouteOutcome, PlanError> {
        let from_stop = self.stop(from)?.clone();
        let to_stop = self.stop(to)?.clone();

        if from == to {
            debug!(stop = %from, "Origin equals destination");
            return Ok(RouteOutcome::Transfer(Itinerary {
                from: from_stop,
                to: to_stop,
                legs: Vec::new(),
                total: RouteAnnotation::unavailable(),
                transfers: 0,
            }));
        }

        let direct: Vec<Line> = self
            .reader
            .lines_serving_both(from, to)
            .into_iter()
            .cloned()
            .collect();
        if !direct.is_empty() {
            info!(%from, %to, lines = direct.len(), "Found direct lines");
            return Ok(RouteOutcome::Direct {
                from: from_stop,
                to: to_stop,
                lines: direct,
            });
        }

        let graph = NetworkGraph::build(self.reader);
        debug!(stops = graph.stop_count(), "Searching for transfer route");
        let Some(path) = shortest_path(&graph, from, to) else {
            info!(%from, %to, "No route found");
            return Ok(RouteOutcome::NoRoute {
                from: from_stop,
                to: to_stop,
            });
        };

        let transfers = transfer_count(&path);
        let legs = self.extract_legs(&path).await;
        if legs.is_empty() {
            warn!(%from, %to, "Path found but no leg could be extracted");
            return Ok(RouteOutcome::NoRoute {
                from: from_stop,
                to: to_stop,
            });
        }

        let total = RouteAnnotation::total(legs.iter().map(|l| &l.annotation));
        info!(%from, %to, transfers, legs = legs.len(), "Found transfer route");

        Ok(RouteOutcome::Transfer(Itinerary {
            from: from_stop,
            to: to_stop,
            legs,
            total,
            transfers,
        }))
    }

    /// Resolve each path leg through the segment extractor, concurrently.
    ///
    /// Legs whose line or stops cannot be found are skipped.
    async fn extract_legs(&self, path: &[PathLeg]) -> Vec<SegmentDetails> {
        let futures = path.iter().map(|leg| async move {
            let Some(line) = self.reader.line(leg.line) else {
                warn!(line = %leg.line, "Path leg refers to a missing line");
                return None;
            };
            let details =
                extract_segment(self.reader, self.provider, line, leg.start, leg.end).await;
            if details.is_none() {
                warn!(
                    line = line.number,
                    start = %leg.start,
                    end = %leg.end,
                    "Could not extract path leg"
                );
            }
            details
        });

        join_all(futures).await.into_iter().flatten().collect()
    }

    /// Stops between two stops on every line serving both.
    ///
    /// Each slice runs in the from-to direction. No distance lookups are
    /// made.
    pub fn stops_between(&self, from: StopId, to: StopId) -> Vec<LineSlice> {
        self.reader
            .lines_serving_both(from, to)
            .into_iter()
            .filter_map(|line| {
                let stops = stops_between(self.reader, line.id, from, to)?;
                Some(LineSlice {
                    line: line.clone(),
                    stops,
                })
            })
            .collect()
    }

    /// Details of one line.
    ///
    /// With a stop pair, the annotated slice between those stops; without,
    /// the whole line.
    pub async fn line_details(
        &self,
        number: i32,
        between: Option<(StopId, StopId)>,
    ) -> Result<SegmentDetails, PlanError> {
        let line = self
            .reader
            .line_by_number(number)
            .ok_or(PlanError::LineNotFound(number))?;

        match between {
            Some((from, to)) => {
                for stop in [from, to] {
                    self.stop(stop)?;
                    if !self
                        .reader
                        .line_segments(line.id)
                        .iter()
                        .any(|s| s.stop == stop)
                    {
                        return Err(PlanError::StopNotOnLine { line: number, stop });
                    }
                }
                extract_segment(self.reader, self.provider, line, from, to)
                    .await
                    .ok_or(PlanError::EmptyLine(number))
            }
            None => extract_line(self.reader, self.provider, line)
                .await
                .ok_or(PlanError::EmptyLine(number)),
        }
    }

    /// Every line serving `stop`, ordered by line number, each annotated
    /// over its full length.
    pub async fn lines_at_stop(&self, stop: StopId) -> Result<Vec<LineAtStop>, PlanError> {
        self.stop(stop)?;

        let lines = self.reader.lines_serving(stop);
        let details = join_all(
            lines
                .iter()
                .map(|line| extract_line(self.reader, self.provider, line)),
        )
        .await;

        Ok(details
            .into_iter()
            .flatten()
            .map(|d| LineAtStop {
                stop_count: d.stop_count(),
                line: d.line,
                first: d.from,
                last: d.to,
                annotation: d.annotation,
            })
            .collect())
    }
}
