//! Inspection entity model, write DTO and read-back view.

use arbor_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::dendrometric::{CreateDendrometric, Dendrometric};
use crate::models::management_action::{CreateManagementAction, ManagementAction};
use crate::models::photo::{CreatePhoto, Photo};
use crate::models::phytosanitary::{CreatePhytosanitary, Phytosanitary};

/// A row from the `inspections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inspection {
    pub id: DbId,
    pub uuid: String,
    pub tree_id: DbId,
    pub inspector_id: Option<DbId>,
    pub inspected_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Header values written on create and on resync.
#[derive(Debug, Clone)]
pub struct UpsertInspection {
    pub uuid: String,
    pub tree_id: DbId,
    pub inspector_id: Option<DbId>,
    pub inspected_at: Timestamp,
}

/// The full set of versioned sub-records written for one inspection sync.
#[derive(Debug, Clone, Default)]
pub struct InspectionSubrecords {
    pub dendrometric: CreateDendrometric,
    pub phytosanitary: CreatePhytosanitary,
    pub management: CreateManagementAction,
    pub photos: Vec<CreatePhoto>,
}

/// Row counts removed by a sub-record replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplacedSubrecords {
    pub dendrometrics: u64,
    pub phytosanitary: u64,
    pub management_actions: u64,
    pub photos: u64,
}

impl ReplacedSubrecords {
    pub fn total(&self) -> u64 {
        self.dendrometrics + self.phytosanitary + self.management_actions + self.photos
    }
}

/// An inspection with its current sub-records.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionDetail {
    #[serde(flatten)]
    pub inspection: Inspection,
    pub tree_uuid: Option<String>,
    pub dendrometric: Option<Dendrometric>,
    pub phytosanitary: Option<Phytosanitary>,
    pub pests: Vec<String>,
    pub management: Option<ManagementAction>,
    pub photos: Vec<Photo>,
}
