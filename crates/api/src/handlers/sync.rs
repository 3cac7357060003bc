//! Handler for offline batch sync from field devices.

use arbor_core::payload::SyncItem;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::background::sync_failures::SyncFailureEvent;
use crate::engine;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeInspector;
use crate::response::SyncResponse;
use crate::state::AppState;

/// POST /sync
///
/// Apply a `{ "sync_batch": [...] }` body in one transaction. The caller's
/// inspector id comes from the bearer token when it validates; sync proceeds
/// anonymously otherwise.
pub async fn sync_batch(
    State(state): State<AppState>,
    MaybeInspector(inspector_id): MaybeInspector,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<SyncResponse>> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let items = parse_batch(body)?;

    match engine::run_sync(
        &state.pool,
        &state.config.sync,
        state.projector.as_ref(),
        inspector_id,
        &items,
    )
    .await
    {
        Ok(stats) => Ok(Json(SyncResponse::committed(stats.items))),
        Err(e) => {
            let details = e.to_string();
            state.failures.report(
                SyncFailureEvent::new(inspector_id, items.len(), details.clone())
                    .with_context(json!({ "item_index": e.item_index() })),
            );
            Err(AppError::SyncFailed { details })
        }
    }
}

/// Pull `sync_batch` out of the body and decode each item.
fn parse_batch(body: Value) -> AppResult<Vec<SyncItem>> {
    let Value::Object(mut body) = body else {
        return Err(AppError::BadRequest("Request body must be a JSON object".into()));
    };
    let Some(Value::Array(raw_items)) = body.remove("sync_batch") else {
        return Err(AppError::BadRequest("sync_batch must be an array".into()));
    };

    raw_items
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            serde_json::from_value(raw)
                .map_err(|e| AppError::BadRequest(format!("sync_batch[{index}]: {e}")))
        })
        .collect()
}
