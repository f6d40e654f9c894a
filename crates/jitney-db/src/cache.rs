//! The ride cache facade and its Redis implementation.
//!
//! Cache entries are keyed `ride:{id}` and hold the serialized read
//! response verbatim, written with a fixed TTL. The cache is a
//! best-effort accelerator: there is no invalidation on update, so a
//! cached ride may be served stale for up to the TTL after an end
//! mutation. The store stays authoritative.

use std::time::Duration;

use async_trait::async_trait;
use fred::prelude::*;
use fred::types::Expiration;
use jitney_types::RideId;

use crate::error::CacheError;

/// Cache key for a ride's serialized snapshot.
pub fn ride_key(id: RideId) -> String {
    format!("ride:{id}")
}

/// Best-effort byte cache contract.
///
/// `get` on an absent key yields [`CacheError::KeyNotFound`],
/// distinguished from backend failures so the read path can tell a miss
/// from an outage.
#[async_trait]
pub trait RideCache: Send + Sync {
    /// Read the raw value at `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, CacheError>;

    /// Write `value` at `key` with the cache's fixed TTL.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError>;

    /// Probe the cache backend.
    async fn health(&self) -> Result<(), CacheError>;
}

/// [`RideCache`] backed by Redis.
#[derive(Clone)]
pub struct RedisRideCache {
    client: Client,
    ttl_secs: i64,
}

impl RedisRideCache {
    /// Connect to Redis at `url` with a fixed `ttl` applied to every set.
    ///
    /// The URL follows the Redis scheme: `redis://host:port` or
    /// `redis://host:port/db`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] if the URL cannot be parsed and
    /// [`CacheError::Backend`] if the connection fails.
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self, CacheError> {
        let config =
            Config::from_url(url).map_err(|e| CacheError::Config(format!("invalid cache URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!(ttl_secs = ttl.as_secs(), "Connected to Redis");
        Ok(Self {
            client,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        })
    }
}

#[async_trait]
impl RideCache for RedisRideCache {
    async fn get(&self, key: &str) -> Result<Vec<u8>, CacheError> {
        let value: Option<Vec<u8>> = self.client.get(key).await?;
        value.ok_or_else(|| CacheError::KeyNotFound(key.to_owned()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let _: () = self
            .client
            .set(
                key,
                value.to_vec(),
                Some(Expiration::EX(self.ttl_secs)),
                None,
                false,
            )
            .await?;
        Ok(())
    }

    async fn health(&self) -> Result<(), CacheError> {
        let _: String = self.client.ping(None).await?;
        Ok(())
    }
}
