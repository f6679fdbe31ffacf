//! Offline distance provider.
//!
//! Estimates distance as the great-circle length of the polyline through
//! the points and duration from a fixed average bus speed. Used when no
//! routing server is reachable, and in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::Coordinate;

use super::error::DistanceError;
use super::{DistanceProvider, RouteDetails};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default average speed for duration estimates.
const DEFAULT_SPEED_KMH: f64 = 20.0;

/// Mock distance provider that never touches the network.
///
/// Clones share the call counter, so a test can hand a clone to the
/// planner and inspect the count afterwards.
#[derive(Debug, Clone)]
pub struct MockDistanceProvider {
    speed_kmh: f64,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockDistanceProvider {
    /// Create a provider using the default average speed.
    pub fn new() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a provider whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Set the average speed used for duration estimates.
    pub fn with_speed(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = speed_kmh;
        self
    }

    /// Number of lookups made so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDistanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Great-circle distance between two points.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

impl DistanceProvider for MockDistanceProvider {
    async fn route_details(&self, points: &[Coordinate]) -> Result<RouteDetails, DistanceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(DistanceError::Unavailable);
        }
        if points.len() < 2 {
            return Err(DistanceError::TooFewPoints(points.len()));
        }

        let distance_km: f64 = points.windows(2).map(|w| haversine_km(&w[0], &w[1])).sum();

        Ok(RouteDetails {
            distance_km,
            duration_mins: distance_km / self.speed_kmh * 60.0,
        })
    }
}
