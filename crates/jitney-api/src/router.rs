//! Axum router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete router:
///
/// - `POST /rides` -- start a ride
/// - `GET /rides/{id}` -- fetch a ride (cache-aside)
/// - `POST /rides/{id}/end` -- end a ride
/// - `GET /reports` -- per-driver earnings (admin)
/// - `GET /health` -- aggregate store + cache health
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/rides", post(handlers::start_ride))
        .route("/rides/{id}", get(handlers::get_ride))
        .route("/rides/{id}/end", post(handlers::end_ride))
        .route("/reports", get(handlers::driver_reports))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
