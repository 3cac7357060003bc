//! Management action record.

use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `management_actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ManagementAction {
    pub id: DbId,
    pub inspection_id: DbId,
    pub needs_management: bool,
    pub action_type: Option<String>,
    pub subtypes: Vec<String>,
    pub justification: Option<String>,
    pub valid_from: Timestamp,
    pub valid_to: Option<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateManagementAction {
    pub needs_management: bool,
    pub action_type: Option<String>,
    pub subtypes: Vec<String>,
    pub justification: Option<String>,
}
