use axum::routing::get;
use axum::Router;

use crate::handlers::inspections;
use crate::state::AppState;

/// Inspection routes mounted at `/inspections`.
///
/// ```text
/// GET    /{uuid}            -> get_inspection
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{uuid}", get(inspections::get_inspection))
}
