//! Axum router construction for the query API.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /cafe` -- venue query
///
/// Every request is traced through [`TraceLayer`].
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/cafe", get(handlers::find_cafes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
