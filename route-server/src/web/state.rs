//! Application state for the web layer.

use std::sync::Arc;

use crate::distance::{CachedDistanceProvider, DistanceBackend};
use crate::store::NetworkStore;

use super::searches::SearchLog;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Current network, reloadable
    pub store: NetworkStore,

    /// Cached distance provider
    pub distance: Arc<CachedDistanceProvider<DistanceBackend>>,

    /// Per-pair route search counts
    pub searches: SearchLog,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: NetworkStore, distance: CachedDistanceProvider<DistanceBackend>) -> Self {
        Self {
            store,
            distance: Arc::new(distance),
            searches: SearchLog::new(),
        }
    }
}
