//! Application state for the Payroll Computation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::config::ConfigLoader;
use crate::data::{DataLoader, DataSnapshot};
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded configuration and the current data snapshot. Handlers
/// clone the snapshot `Arc` and compute against it; a reload swaps in a new
/// snapshot without disturbing calculations already in flight.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// The current employee and attendance snapshot.
    snapshot: Arc<RwLock<Arc<DataSnapshot>>>,
    /// Directory the snapshot is reloaded from.
    data_dir: Arc<PathBuf>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: ConfigLoader, snapshot: DataSnapshot, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: Arc::new(config),
            snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
            data_dir: Arc::new(data_dir.into()),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the current data snapshot.
    pub async fn snapshot(&self) -> Arc<DataSnapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Reloads the data snapshot from the data directory.
    ///
    /// On failure the current snapshot is kept.
    pub async fn reload(&self) -> EngineResult<Arc<DataSnapshot>> {
        let fresh = Arc::new(DataLoader::load(self.data_dir.as_path())?);
        *self.snapshot.write().await = Arc::clone(&fresh);
        info!(path = %self.data_dir.display(), "Data snapshot reloaded");
        Ok(fresh)
    }
}
