//! Error types for the data layer.
//!
//! [`StoreError`] and [`CacheError`] are kept separate on purpose: a store
//! failure is an internal failure the caller must surface, while a cache
//! failure is always non-fatal and swallowed after logging by the read
//! path. "Ride not found" and "key not found" are distinguished variants,
//! never generic errors, so callers can branch on them.

use jitney_types::RideId;

/// Errors from the persistent ride store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The requested ride ID is unknown to the store. Terminal for the
    /// request; distinguished from transient failures.
    #[error("ride not found: {0}")]
    RideNotFound(RideId),

    /// A stored row failed to decode into a ride (e.g. an unknown kind
    /// label). Fails closed rather than guessing.
    #[error("invalid row for ride {id}: {reason}")]
    InvalidRow {
        /// The ride whose row failed to decode.
        id: RideId,
        /// What was wrong with the row.
        reason: String,
    },

    /// A configuration error (bad URL, bad pool settings).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors from the ride cache. Always non-fatal to reads.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A Redis operation failed.
    #[error("cache backend error: {0}")]
    Backend(#[from] fred::error::Error),

    /// The key is absent -- a cache miss, distinguished from failures.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A configuration error (bad URL).
    #[error("configuration error: {0}")]
    Config(String),
}
