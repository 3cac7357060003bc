//! Dendrometric (trunk and crown measurement) record.

use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `dendrometrics` table. `valid_to = NULL` marks the current row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dendrometric {
    pub id: DbId,
    pub inspection_id: DbId,
    pub dbh_cm: Option<f64>,
    pub total_height_m: Option<f64>,
    pub crown_height_m: Option<f64>,
    pub crown_diameter_m: Option<f64>,
    pub valid_from: Timestamp,
    pub valid_to: Option<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateDendrometric {
    pub dbh_cm: Option<f64>,
    pub total_height_m: Option<f64>,
    pub crown_height_m: Option<f64>,
    pub crown_diameter_m: Option<f64>,
}
