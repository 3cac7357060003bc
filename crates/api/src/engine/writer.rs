//! Write an inspection and its versioned sub-records.

use arbor_core::payload::InspectionPayload;
use arbor_core::tree_status::TreeStatus;
use arbor_core::types::{DbId, Timestamp};
use arbor_db::models::dendrometric::CreateDendrometric;
use arbor_db::models::inspection::{InspectionSubrecords, UpsertInspection};
use arbor_db::models::management_action::CreateManagementAction;
use arbor_db::models::photo::CreatePhoto;
use arbor_db::models::phytosanitary::CreatePhytosanitary;
use arbor_db::repositories::{InspectionRepo, PestRepo, TreeRepo};
use sqlx::PgConnection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionOutcome {
    /// No client uuid; nothing written.
    Ignored,
    Created,
    /// Known uuid; header refreshed and sub-records replaced.
    Replaced,
}

/// Build the sub-records for one inspection. `pest_ids` are already resolved.
pub fn subrecords_from_payload(
    payload: &InspectionPayload,
    pest_ids: Vec<DbId>,
) -> InspectionSubrecords {
    let dendrometric = payload
        .dendrometric
        .as_ref()
        .map(|d| CreateDendrometric {
            dbh_cm: d.dbh_cm,
            total_height_m: d.total_height_m,
            crown_height_m: d.crown_height_m,
            crown_diameter_m: d.crown_diameter_m,
        })
        .unwrap_or_default();

    let phytosanitary = match &payload.phytosanitary {
        Some(p) => CreatePhytosanitary {
            health_status: trimmed(p.health_status.as_deref()),
            severity: p.severity,
            probability: p.probability,
            consequence: p.consequence,
            pest_ids,
        },
        None => CreatePhytosanitary {
            pest_ids,
            ..Default::default()
        },
    };

    let management = payload
        .management
        .as_ref()
        .map(|m| CreateManagementAction {
            needs_management: m.needs_management.unwrap_or(false),
            action_type: trimmed(m.action_type.as_deref()),
            subtypes: m
                .subtypes
                .as_deref()
                .unwrap_or_default()
                .iter()
                .filter_map(|s| trimmed(Some(s.as_str())))
                .collect(),
            justification: trimmed(m.justification.as_deref()),
        })
        .unwrap_or_default();

    let photos = payload
        .persistable_photos()
        .into_iter()
        .map(|photo| CreatePhoto {
            uri: photo.uri,
            category: photo.category,
            is_cover: photo.is_cover,
        })
        .collect();

    InspectionSubrecords {
        dendrometric,
        phytosanitary,
        management,
        photos,
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Upsert the inspection for `tree_id`, replace its sub-records and apply
/// the removal flag to the tree.
pub async fn write_inspection(
    conn: &mut PgConnection,
    tree_id: DbId,
    inspector_id: Option<DbId>,
    payload: &InspectionPayload,
    now: Timestamp,
) -> Result<InspectionOutcome, sqlx::Error> {
    let Some(uuid) = payload.uuid() else {
        tracing::debug!(tree_id, "Inspection without uuid ignored");
        return Ok(InspectionOutcome::Ignored);
    };

    let header = UpsertInspection {
        uuid: uuid.to_string(),
        tree_id,
        inspector_id,
        inspected_at: payload.inspected_at(now),
    };

    let (inspection, outcome) = match InspectionRepo::find_by_uuid(&mut *conn, uuid).await? {
        Some(existing) => (
            InspectionRepo::update_header(&mut *conn, existing.id, &header).await?,
            InspectionOutcome::Replaced,
        ),
        None => (
            InspectionRepo::create(&mut *conn, &header).await?,
            InspectionOutcome::Created,
        ),
    };

    let pests = PestRepo::find_or_create_by_names(&mut *conn, &payload.pest_names()).await?;
    let records = subrecords_from_payload(payload, pests.iter().map(|p| p.id).collect());
    InspectionRepo::replace_subrecords(&mut *conn, inspection.id, &records, now).await?;

    if let Some(status) = TreeStatus::from_removal_flag(payload.tree_removed) {
        TreeRepo::set_status(&mut *conn, tree_id, status).await?;
    }

    Ok(outcome)
}
