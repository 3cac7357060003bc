use std::sync::Arc;

use arbor_core::geo::CoordinateProjector;

use crate::background::sync_failures::SyncFailureReporter;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: arbor_db::DbPool,
    /// Server configuration (JWT secret, sync budgets, sentinel species).
    pub config: Arc<ServerConfig>,
    /// Validates and projects survey coordinates before the spatial update.
    pub projector: Arc<dyn CoordinateProjector>,
    /// Hands failed batches to the background recorder.
    pub failures: SyncFailureReporter,
}
