//! File-backed network store with reload support.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::data::NetworkData;
use super::error::StoreError;
use super::reader::NetworkReader;

/// Thread-safe handle to the current network snapshot.
///
/// Cloning is cheap; all clones share the same snapshot. `reload` swaps in
/// a new snapshot atomically, and requests that already hold the previous
/// one keep using it until they finish.
#[derive(Clone)]
pub struct NetworkStore {
    inner: Arc<RwLock<Arc<NetworkData>>>,
    path: Option<PathBuf>,
}

impl NetworkStore {
    /// Load the store from a JSON file.
    ///
    /// This will fail if the file is missing or the data is invalid.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = load_file(&path).await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(data))),
            path: Some(path),
        })
    }

    /// Create a store from in-memory data (for tests and fixtures).
    pub fn from_data(data: NetworkData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(data))),
            path: None,
        }
    }

    /// Take a consistent snapshot of the network.
    pub async fn snapshot(&self) -> Arc<NetworkData> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Reload the network from the backing file.
    ///
    /// On success, replaces the current snapshot and returns the number of
    /// stops loaded. On failure, the existing snapshot is preserved and the
    /// error is returned.
    pub async fn reload(&self) -> Result<usize, StoreError> {
        let path = self.path.as_ref().ok_or(StoreError::NotReloadable)?;
        let data = load_file(path).await?;
        let count = data.stops().len();

        let mut guard = self.inner.write().await;
        *guard = Arc::new(data);

        Ok(count)
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

async fn load_file(path: &Path) -> Result<NetworkData, StoreError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let data = NetworkData::from_json(&json)?;
    info!(
        path = %path.display(),
        stops = data.stops().len(),
        lines = data.lines().len(),
        segments = data.segments().len(),
        "Loaded network data"
    );

    Ok(data)
}
