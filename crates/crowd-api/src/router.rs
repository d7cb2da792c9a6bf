//! Axum router construction for the crowd API.
//!
//! Assembles all routes into a single [`Router`] with fully open CORS so
//! the map frontend can be hosted on any origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /crowd-data` -- snapshot of every location
/// - `GET /history/{*location}` -- history for one location; the name may
///   contain `/`
/// - `GET /api/locations` -- location registry
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Core endpoints
        .route("/crowd-data", get(handlers::get_crowd_data))
        .route("/history/{*location}", get(handlers::get_history))
        // Empty location name; the wildcard does not match it.
        .route("/history/", get(handlers::get_history))
        // Registry
        .route("/api/locations", get(handlers::list_locations))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
