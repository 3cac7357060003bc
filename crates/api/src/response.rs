//! Shared response envelope types for API handlers.
//!
//! Read endpoints use a `{ "data": ... }` envelope. The sync endpoint keeps
//! the flat shape mobile clients already parse, see [`SyncResponse`].

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: detail }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body of a committed sync batch.
///
/// `errors` is always empty: a batch either commits whole or fails with a 500.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub processed: usize,
    pub errors: Vec<String>,
}

impl SyncResponse {
    pub fn committed(processed: usize) -> Self {
        Self {
            success: true,
            processed,
            errors: Vec::new(),
        }
    }
}
