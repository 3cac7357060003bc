use axum::routing::post;
use axum::Router;

use crate::handlers::sync;
use crate::state::AppState;

/// Mount the sync endpoint at the root, where deployed mobile clients post.
///
/// ```text
/// POST   /sync              -> sync_batch
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/sync", post(sync::sync_batch))
}
