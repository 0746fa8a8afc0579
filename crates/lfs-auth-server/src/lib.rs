//! # lfs-auth-server
//!
//! Runs the Git LFS token validator inside an axum request pipeline.
//!
//! The [`middleware::auth::resolve_identity`] layer turns a
//! `Authorization: Git-LFS-Token <hex>` header into an
//! [`lfs_auth_token::Identity`] request extension. Requests without one
//! continue anonymously; deciding what anonymous callers may do is left to
//! the routes behind the layer.

pub mod config;
pub mod middleware;
pub mod pool;
pub mod state;

use axum::{Router, routing::get};
use middleware::{auth::resolve_identity, handlers};
use state::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/whoami", get(handlers::whoami))
        .route_layer(axum::middleware::from_fn_with_state(state, resolve_identity))
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
}
