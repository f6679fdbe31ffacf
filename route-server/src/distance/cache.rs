//! Caching layer for distance lookups.
//!
//! Results are keyed by the exact coordinate sequence, so the same stop
//! slice asked twice costs one API call. Only successful lookups are
//! cached; failures are retried on the next request.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Coordinate;

use super::error::DistanceError;
use super::{DistanceProvider, RouteDetails};

/// Cache key: coordinate bit patterns, in visiting order.
type RouteKey = Vec<(u64, u64)>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct DistanceCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for DistanceCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 10_000,
        }
    }
}

/// Distance provider with caching.
///
/// Wraps any `DistanceProvider` and caches successful responses.
pub struct CachedDistanceProvider<P> {
    inner: P,
    cache: MokaCache<RouteKey, RouteDetails>,
}

impl<P: DistanceProvider> CachedDistanceProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &DistanceCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }
}

fn route_key(points: &[Coordinate]) -> RouteKey {
    points
        .iter()
        .map(|c| (c.latitude().to_bits(), c.longitude().to_bits()))
        .collect()
}

impl<P: DistanceProvider + Sync> DistanceProvider for CachedDistanceProvider<P> {
    async fn route_details(&self, points: &[Coordinate]) -> Result<RouteDetails, DistanceError> {
        let key = route_key(points);

        // Try cache first
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let details = self.inner.route_details(points).await?;
        self.cache.insert(key, details).await;

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::MockDistanceProvider;

    fn points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(16.77, 96.15).unwrap(),
            Coordinate::new(16.80, 96.16).unwrap(),
        ]
    }

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let mock = MockDistanceProvider::new();
        let cached = CachedDistanceProvider::new(mock.clone(), &DistanceCacheConfig::default());

        let first = cached.route_details(&points()).await.unwrap();
        let second = cached.route_details(&points()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn reversed_sequence_is_a_different_key() {
        let mock = MockDistanceProvider::new();
        let cached = CachedDistanceProvider::new(mock.clone(), &DistanceCacheConfig::default());

        let mut reversed = points();
        reversed.reverse();

        cached.route_details(&points()).await.unwrap();
        cached.route_details(&reversed).await.unwrap();

        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let mock = MockDistanceProvider::failing();
        let cached = CachedDistanceProvider::new(mock.clone(), &DistanceCacheConfig::default());

        assert!(cached.route_details(&points()).await.is_err());
        assert!(cached.route_details(&points()).await.is_err());

        assert_eq!(mock.call_count(), 2);
    }
}
