//! Shared type definitions for the jitney ride service.
//!
//! A [`Ride`] is the single persistent entity: opened by a driver, closed
//! once with a traveled distance, and never deleted. This crate owns the
//! ride's identity type, its lifecycle validation rules, and the serialized
//! snapshot shape used both as the HTTP read response and as the cache
//! value.
//!
//! # Modules
//!
//! - [`ids`] -- ride identifier newtype
//! - [`ride`] -- ride entity, kind labels, validation
//! - [`snapshot`] -- serialized read-response / cache-value shape

pub mod ids;
pub mod ride;
pub mod snapshot;

pub use ids::RideId;
pub use ride::{Ride, RideKind, ValidationError};
pub use snapshot::RideSnapshot;
