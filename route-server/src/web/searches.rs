//! Route search counter.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::StopId;

/// Counts how often each (origin, destination) pair has been searched.
///
/// Counts live in memory and start from zero on every restart. Cloning is
/// cheap; all clones share the same counts.
#[derive(Clone, Default)]
pub struct SearchLog {
    counts: Arc<Mutex<HashMap<(StopId, StopId), u64>>>,
}

impl SearchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one search from `from` to `to` and return the new total for
    /// that pair.
    pub async fn record(&self, from: StopId, to: StopId) -> u64 {
        let mut counts = self.counts.lock().await;
        let count = counts.entry((from, to)).or_insert(0);
        *count += 1;
        *count
    }
}
