//! Species catalog entity model.

use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `species` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Species {
    pub id: DbId,
    pub common_name: String,
    pub scientific_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
