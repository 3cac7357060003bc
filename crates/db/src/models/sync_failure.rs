//! Failed sync batch record.

use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sync_failures` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SyncFailure {
    pub id: DbId,
    pub inspector_id: Option<DbId>,
    pub batch_size: i32,
    pub error: String,
    pub context: serde_json::Value,
    pub occurred_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for recording a failed batch.
#[derive(Debug, Clone)]
pub struct CreateSyncFailure {
    pub inspector_id: Option<DbId>,
    pub batch_size: i32,
    pub error: String,
    pub context: serde_json::Value,
    pub occurred_at: Timestamp,
}
