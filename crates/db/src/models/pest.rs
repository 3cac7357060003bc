//! Pest reference entity.

use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `pests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pest {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub created_at: Timestamp,
}
