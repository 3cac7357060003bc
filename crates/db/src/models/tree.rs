//! Canonical tree entity model and write DTOs.

use arbor_core::tree_status::TreeStatus;
use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `trees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tree {
    pub id: DbId,
    pub uuid: Option<String>,
    pub tag: Option<String>,
    pub species_id: DbId,
    pub display_name: Option<String>,
    pub cover_photo: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tree {
    /// Parsed lifecycle status. The column's check constraint keeps this total.
    pub fn lifecycle(&self) -> Option<TreeStatus> {
        TreeStatus::parse(&self.status)
    }
}

/// Values for a tree seen for the first time.
#[derive(Debug, Clone)]
pub struct CreateTree {
    pub uuid: String,
    pub tag: Option<String>,
    pub species_id: DbId,
    pub display_name: String,
    pub cover_photo: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
}

/// Merged mutable fields for an existing tree.
///
/// Every field holds the final value; merge decisions happen before this
/// struct is built.
#[derive(Debug, Clone)]
pub struct UpdateTree {
    pub species_id: DbId,
    pub display_name: String,
    pub cover_photo: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub neighborhood: Option<String>,
}
