pub mod health;
pub mod inspections;
pub mod sync;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /inspections/{uuid}        current state of one inspection (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/inspections", inspections::router())
}
