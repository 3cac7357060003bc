//! Read-back of synced inspections.

use arbor_core::error::CoreError;
use arbor_db::models::inspection::InspectionDetail;
use arbor_db::repositories::InspectionRepo;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/inspections/{uuid}
///
/// The inspection header with its current sub-records and pest names.
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<DataResponse<InspectionDetail>>> {
    let detail = InspectionRepo::find_detail_by_uuid(&state.pool, &uuid)
        .await?
        .ok_or(CoreError::NotFoundByKey {
            entity: "Inspection",
            key: uuid,
        })?;

    Ok(Json(DataResponse { data: detail }))
}
