//! Domain logic for the jitney ride service.
//!
//! Everything in this crate is pure and synchronous: fare pricing, report
//! aggregation, and the authorization gate. Persistence and transport live
//! in `jitney-db` and `jitney-api`; they call into this crate, never the
//! other way around.
//!
//! # Modules
//!
//! - [`fare`] -- tiered fare pricing with the shared-ride discount
//! - [`report`] -- per-driver earnings aggregation
//! - [`auth`] -- credential lookup, roles, and the mutation gate

pub mod auth;
pub mod fare;
pub mod report;

pub use auth::{authorize_ride_mutation, has_role, AuthError, Credential, CredentialTable, Role, User};
pub use fare::ride_fee;
pub use report::{by_driver, DriverReport};
