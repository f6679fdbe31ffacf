//! Distance and travel-time annotation.
//!
//! Route choice never depends on this module: a path is computed first and
//! its stop coordinates are then sent to an OSRM-compatible routing API to
//! obtain road distance and driving time. Any failure here degrades to
//! "unavailable" values in the planner; it never fails a search.
//!
//! Key characteristics:
//! - One call per stop slice, with a short timeout (5 seconds by default)
//! - No retries
//! - Successful results can be cached by coordinate sequence

mod cache;
mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

use crate::domain::Coordinate;

pub use cache::{CachedDistanceProvider, DistanceCacheConfig};
pub use client::{OsrmClient, OsrmConfig};
pub use error::DistanceError;
pub use mock::MockDistanceProvider;
pub use types::{OsrmRoute, OsrmRouteResponse};

/// Road distance and driving time along a sequence of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteDetails {
    pub distance_km: f64,
    pub duration_mins: f64,
}

/// Trait for providing distance/duration along a coordinate sequence.
///
/// This abstraction allows the planner to be tested without network access.
pub trait DistanceProvider {
    /// Distance and duration visiting `points` in order.
    ///
    /// Implementations must reject fewer than two points with
    /// `DistanceError::TooFewPoints`.
    fn route_details(
        &self,
        points: &[Coordinate],
    ) -> impl Future<Output = Result<RouteDetails, DistanceError>> + Send;
}

/// The provider selected at startup.
#[derive(Debug, Clone)]
pub enum DistanceBackend {
    /// Live OSRM routing API
    Osrm(OsrmClient),
    /// Straight-line estimate, no network access
    Offline(MockDistanceProvider),
}

impl DistanceProvider for DistanceBackend {
    async fn route_details(&self, points: &[Coordinate]) -> Result<RouteDetails, DistanceError> {
        match self {
            DistanceBackend::Osrm(client) => client.route_details(points).await,
            DistanceBackend::Offline(mock) => mock.route_details(points).await,
        }
    }
}
