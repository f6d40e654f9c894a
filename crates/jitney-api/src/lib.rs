//! HTTP API server for the jitney ride service.
//!
//! Routing, request-context extraction, and error mapping live here; the
//! domain rules they enforce live in `jitney-core` and the storage in
//! `jitney-db`. Every handler receives an explicit [`context::RequestContext`]
//! built per request from Basic-auth credentials -- there is no ambient
//! request state.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/rides` | Start a ride |
//! | `POST` | `/rides/{id}/end` | End a ride with its distance |
//! | `GET` | `/rides/{id}` | Fetch a ride (cache-aside) |
//! | `GET` | `/reports` | Per-driver earnings (admin) |
//! | `GET` | `/health` | Aggregate store + cache health |

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use state::AppState;
