//! Data layer for the jitney ride service (`PostgreSQL` + Redis).
//!
//! `PostgreSQL` is the system of record for rides. Redis is a best-effort
//! read accelerator: every cache operation may fail or time out without
//! affecting correctness, only latency. The cache-aside read path in
//! [`read_path`] coordinates the two on the hot read.
//!
//! ```text
//! GET ride
//!     |
//!     +-- cache get --------> Redis     (RideCache, bounded timeout)
//!     |       miss/error
//!     +-- store get --------> PostgreSQL (RideStore, authoritative)
//!             |
//!             +-- best-effort cache set (fixed TTL)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`store`] -- the ride store facade and its `PostgreSQL` implementation
//! - [`cache`] -- the ride cache facade and its Redis implementation
//! - [`read_path`] -- the cache-aside read coordinator
//! - [`error`] -- store and cache error types

pub mod cache;
pub mod error;
pub mod postgres;
pub mod read_path;
pub mod store;

pub use cache::{RedisRideCache, RideCache};
pub use error::{CacheError, StoreError};
pub use postgres::{PostgresConfig, PostgresPool};
pub use read_path::{CacheAsideReader, ReadError};
pub use store::{PgRideStore, RideStore};
