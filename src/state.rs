//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::db::{PersistenceGateway, SqliteGateway};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: SqlitePool,

    /// Score persistence used by judging
    pub gateway: Arc<dyn PersistenceGateway>,
}

impl AppState {
    /// Create a new application state backed by `db`
    pub fn new(db: SqlitePool) -> Self {
        let gateway = Arc::new(SqliteGateway::new(db.clone()));
        Self::with_gateway(db, gateway)
    }

    /// Create a state with a custom persistence gateway
    pub fn with_gateway(db: SqlitePool, gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db, gateway }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &SqlitePool {
        &self.inner.db
    }

    /// Get the persistence gateway
    pub fn gateway(&self) -> &dyn PersistenceGateway {
        self.inner.gateway.as_ref()
    }
}
