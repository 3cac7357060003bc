//! Inspection photo reference.

use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub inspection_id: DbId,
    pub uri: String,
    pub category: String,
    pub is_cover: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePhoto {
    pub uri: String,
    pub category: String,
    pub is_cover: bool,
}
