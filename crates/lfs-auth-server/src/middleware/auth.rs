use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;

/// Axum middleware resolving the caller behind a `Git-LFS-Token` header.
///
/// - token matches a live record: the [`lfs_auth_token::Identity`] is
///   inserted as a request extension
/// - header absent, malformed, or no match: the request continues anonymous
/// - token store unusable: `500`, since that is misconfiguration rather
///   than an anonymous caller
pub async fn resolve_identity(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // A non-UTF-8 header cannot hold a token; treat it as absent.
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    match state.validators.authenticate(header, Utc::now()).await {
        Ok(Some(identity)) => {
            req.extensions_mut().insert(identity);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "token validation failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    Ok(next.run(req).await)
}
