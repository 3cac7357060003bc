//! Phytosanitary (health and risk) record.

use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `phytosanitary_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Phytosanitary {
    pub id: DbId,
    pub inspection_id: DbId,
    pub health_status: Option<String>,
    pub severity: Option<i32>,
    pub probability: Option<i32>,
    pub consequence: Option<i32>,
    pub valid_from: Timestamp,
    pub valid_to: Option<Timestamp>,
}

/// Health assessment plus the pest ids already resolved by name.
#[derive(Debug, Clone, Default)]
pub struct CreatePhytosanitary {
    pub health_status: Option<String>,
    pub severity: Option<i32>,
    pub probability: Option<i32>,
    pub consequence: Option<i32>,
    pub pest_ids: Vec<DbId>,
}
