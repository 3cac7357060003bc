//! Optional inspector extractor for Axum handlers.

use std::convert::Infallible;

use arbor_core::types::DbId;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::state::AppState;

/// The inspector behind a request, when one can be identified.
///
/// Sync must keep working for devices whose token has lapsed in the field,
/// so a missing, malformed or expired token yields `None` instead of a
/// rejection:
///
/// ```ignore
/// async fn my_handler(MaybeInspector(inspector_id): MaybeInspector) { ... }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeInspector(pub Option<DbId>);

impl FromRequestParts<AppState> for MaybeInspector {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        else {
            return Ok(MaybeInspector(None));
        };

        match validate_token(token.trim(), &state.config.jwt) {
            Ok(claims) => Ok(MaybeInspector(Some(claims.sub))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid bearer token");
                Ok(MaybeInspector(None))
            }
        }
    }
}
