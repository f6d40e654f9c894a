//! REST endpoint handlers.
//!
//! Mutations pass the authorization gate before any store write and the
//! ride model's validation before persistence. The hot read goes through
//! the cache-aside reader; everything else talks to the store directly.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use jitney_core::auth::{authorize_ride_mutation, has_role, AuthError, Role};
use jitney_core::report::{by_driver, DriverReport};
use jitney_types::{Ride, RideId, RideKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /rides`.
#[derive(Debug, Deserialize)]
pub struct StartRideRequest {
    /// Driver login the ride belongs to.
    pub driver: String,
    /// `"shared"` or `"private"`; anything else is a decode error.
    pub kind: RideKind,
}

/// Body of `POST /rides/{id}/end`.
#[derive(Debug, Deserialize)]
pub struct EndRideRequest {
    /// Traveled distance in miles.
    pub distance: f64,
}

/// Response of both mutation endpoints: `{id, action}`.
#[derive(Debug, Serialize)]
pub struct RideActionResponse {
    /// The ride acted upon.
    pub id: RideId,
    /// `"start"` or `"end"`.
    pub action: &'static str,
}

/// Aggregate health of the store and the cache.
///
/// `null` means healthy; a string carries the failure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Store probe outcome.
    pub store: Option<String>,
    /// Cache probe outcome.
    pub cache: Option<String>,
}

/// `POST /rides` -- open a new ride for the authenticated driver.
pub async fn start_ride(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(req): Json<StartRideRequest>,
) -> Result<Json<RideActionResponse>, ApiError> {
    authorize_ride_mutation(ctx.user.as_ref(), &req.driver)?;

    let ride = Ride::open(req.driver, req.kind);
    ride.validate()?;
    state.store.add(&ride).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        ride_id = %ride.id,
        driver = %ride.driver,
        kind = %ride.kind,
        "Ride started"
    );
    Ok(Json(RideActionResponse {
        id: ride.id,
        action: "start",
    }))
}

/// `POST /rides/{id}/end` -- close a ride with its traveled distance.
///
/// Reads the authoritative store (never the cache), gates against the
/// stored ride's driver, and replaces the full record. The cached copy,
/// if any, stays until its TTL expires.
pub async fn end_ride(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
    Json(req): Json<EndRideRequest>,
) -> Result<Json<RideActionResponse>, ApiError> {
    // Authentication is checked before touching the store at all; the
    // identity and role checks need the stored ride's driver.
    let user = ctx.authenticated()?.clone();

    let id = RideId::from(id);
    let mut ride = state.store.get(id).await?;
    authorize_ride_mutation(Some(&user), &ride.driver)?;

    ride.close(Utc::now(), req.distance)?;
    ride.validate()?;
    state.store.update(&ride).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        ride_id = %id,
        driver = %ride.driver,
        distance = ride.distance,
        "Ride ended"
    );
    Ok(Json(RideActionResponse { id, action: "end" }))
}

/// `GET /rides/{id}` -- fetch a ride through the cache-aside read path.
///
/// The response bytes are exactly the cached value, so a hit is served
/// without re-encoding.
pub async fn get_ride(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let id = RideId::from(id);
    let body = state.reader.read(id).await?;

    tracing::debug!(request_id = %ctx.request_id, ride_id = %id, "Ride read");
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        body,
    ))
}

/// `GET /reports` -- per-driver earnings over the full ride set.
///
/// Admin only, by exact role match.
pub async fn driver_reports(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Result<Json<Vec<DriverReport>>, ApiError> {
    let user = ctx.authenticated()?;
    if !has_role(user, &[Role::Admin]) {
        return Err(ApiError::Auth(AuthError::RoleInsufficient { role: user.role }));
    }

    let rides = state.store.list().await?;
    let reports = by_driver(&rides);

    tracing::info!(
        request_id = %ctx.request_id,
        rides = rides.len(),
        drivers = reports.len(),
        "Reports generated"
    );
    Ok(Json(reports))
}

/// `GET /health` -- aggregate health of the store and the cache.
///
/// Returns 500 when either dependency fails, with the per-dependency
/// outcome in the body.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.health().await.err().map(|e| e.to_string());
    let cache = state.cache.health().await.err().map(|e| e.to_string());

    let status = if store.is_none() && cache.is_none() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(HealthResponse { store, cache }))
}
