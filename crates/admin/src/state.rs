//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminApiConfig;
use crate::db::Database;

/// Application state shared across all handlers.
///
/// Holds configuration only. There is no connection pool and no mutable
/// state; handlers open their own connections through [`Database`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminApiConfig,
    database: Database,
}

impl AppState {
    /// Create application state from configuration.
    #[must_use]
    pub fn new(config: AdminApiConfig) -> Self {
        let database = Database::new(config.database_path.clone());
        Self {
            inner: Arc::new(AppStateInner { config, database }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AdminApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database handle.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.inner.database
    }
}
