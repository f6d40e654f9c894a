//! Cache-aside coordinator for the hot ride read.
//!
//! One read of ride `k`: consult the cache first; on a hit return the
//! cached bytes as-is. On a miss (or any cache failure or timeout) read
//! the authoritative store, serialize the snapshot, best-effort populate
//! the cache, and return the fresh bytes. A cache outage degrades to
//! store-only reads; it never fails the request. Every cache call is
//! wrapped in a bounded timeout so a stuck cache cannot hold the request
//! past its deadline -- cancellation otherwise propagates by future drop.

use std::sync::Arc;
use std::time::Duration;

use jitney_types::{RideId, RideSnapshot};
use tokio::time::timeout;

use crate::cache::{ride_key, RideCache};
use crate::error::{CacheError, StoreError};
use crate::store::RideStore;

/// Errors surfaced by the cache-aside read.
///
/// Cache failures never appear here; they are logged and absorbed.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The ride is unknown to the store.
    #[error("ride not found: {0}")]
    NotFound(RideId),

    /// The store failed for a reason other than absence.
    #[error(transparent)]
    Store(StoreError),

    /// The fresh ride failed to serialize for the response/cache value.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for ReadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RideNotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Coordinates the cache and the store on the hot read path.
#[derive(Clone)]
pub struct CacheAsideReader {
    store: Arc<dyn RideStore>,
    cache: Arc<dyn RideCache>,
    cache_op_timeout: Duration,
}

impl CacheAsideReader {
    /// Build a reader over shared store and cache handles.
    ///
    /// `cache_op_timeout` bounds every individual cache operation; it
    /// should be well below the request deadline so a slow cache always
    /// degrades to a store read instead of stalling the request.
    pub fn new(
        store: Arc<dyn RideStore>,
        cache: Arc<dyn RideCache>,
        cache_op_timeout: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            cache_op_timeout,
        }
    }

    /// Read the serialized snapshot for `id`.
    ///
    /// Returns the cached bytes verbatim on a hit; otherwise the freshly
    /// serialized store row, after a best-effort cache populate with the
    /// cache's fixed TTL.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::NotFound`] when the store does not know the
    /// ID, and [`ReadError::Store`] for any other store failure. Cache
    /// failures are logged and never returned.
    pub async fn read(&self, id: RideId) -> Result<Vec<u8>, ReadError> {
        let key = ride_key(id);

        match timeout(self.cache_op_timeout, self.cache.get(&key)).await {
            Ok(Ok(bytes)) => {
                tracing::debug!(ride_id = %id, "Cache hit");
                return Ok(bytes);
            }
            Ok(Err(CacheError::KeyNotFound(_))) => {
                tracing::debug!(ride_id = %id, "Cache miss");
            }
            Ok(Err(err)) => {
                tracing::warn!(ride_id = %id, error = %err, "Cache read failed; falling back to store");
            }
            Err(_) => {
                tracing::warn!(ride_id = %id, "Cache read timed out; falling back to store");
            }
        }

        let ride = self.store.get(id).await?;
        let bytes = serde_json::to_vec(&RideSnapshot::from(&ride))?;

        match timeout(self.cache_op_timeout, self.cache.set(&key, &bytes)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(ride_id = %id, error = %err, "Cache populate failed");
            }
            Err(_) => {
                tracing::warn!(ride_id = %id, "Cache populate timed out");
            }
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use jitney_types::{Ride, RideKind};

    use super::*;

    const OP_TIMEOUT: Duration = Duration::from_millis(50);

    #[derive(Default)]
    struct FakeStore {
        rides: Mutex<HashMap<RideId, Ride>>,
        offline: AtomicBool,
    }

    impl FakeStore {
        fn with_ride(ride: &Ride) -> Arc<Self> {
            let store = Self::default();
            store
                .rides
                .lock()
                .unwrap()
                .insert(ride.id, ride.clone());
            Arc::new(store)
        }

        fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }

        fn check_online(&self) -> Result<(), StoreError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(StoreError::Config(String::from("store offline")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RideStore for FakeStore {
        async fn add(&self, ride: &Ride) -> Result<(), StoreError> {
            self.check_online()?;
            self.rides.lock().unwrap().insert(ride.id, ride.clone());
            Ok(())
        }

        async fn get(&self, id: RideId) -> Result<Ride, StoreError> {
            self.check_online()?;
            self.rides
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(StoreError::RideNotFound(id))
        }

        async fn update(&self, ride: &Ride) -> Result<(), StoreError> {
            self.check_online()?;
            self.rides.lock().unwrap().insert(ride.id, ride.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Ride>, StoreError> {
            self.check_online()?;
            Ok(self.rides.lock().unwrap().values().cloned().collect())
        }

        async fn health(&self) -> Result<(), StoreError> {
            self.check_online()
        }
    }

    #[derive(Default)]
    struct FakeCache {
        entries: Mutex<HashMap<String, Vec<u8>>>,
        broken: bool,
    }

    impl FakeCache {
        fn broken() -> Arc<Self> {
            Arc::new(Self {
                entries: Mutex::new(HashMap::new()),
                broken: true,
            })
        }
    }

    #[async_trait]
    impl RideCache for FakeCache {
        async fn get(&self, key: &str) -> Result<Vec<u8>, CacheError> {
            if self.broken {
                return Err(CacheError::Config(String::from("cache offline")));
            }
            self.entries
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or_else(|| CacheError::KeyNotFound(key.to_owned()))
        }

        async fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
            if self.broken {
                return Err(CacheError::Config(String::from("cache offline")));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_owned(), value.to_vec());
            Ok(())
        }

        async fn health(&self) -> Result<(), CacheError> {
            if self.broken {
                return Err(CacheError::Config(String::from("cache offline")));
            }
            Ok(())
        }
    }

    fn closed_ride() -> Ride {
        let mut ride = Ride::open("otto", RideKind::Shared);
        ride.close(ride.start + chrono::Duration::minutes(10), 4.2)
            .unwrap();
        ride
    }

    #[tokio::test]
    async fn miss_reads_store_and_populates_cache() {
        let ride = closed_ride();
        let store = FakeStore::with_ride(&ride);
        let cache = Arc::new(FakeCache::default());
        let reader = CacheAsideReader::new(store, cache.clone(), OP_TIMEOUT);

        let bytes = reader.read(ride.id).await.unwrap();
        let snapshot: RideSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(snapshot, RideSnapshot::from(&ride));

        let cached = cache.entries.lock().unwrap().get(&ride_key(ride.id)).cloned();
        assert_eq!(cached, Some(bytes));
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache_alone() {
        let ride = closed_ride();
        let store = FakeStore::with_ride(&ride);
        let cache = Arc::new(FakeCache::default());
        let reader = CacheAsideReader::new(store.clone(), cache, OP_TIMEOUT);

        let first = reader.read(ride.id).await.unwrap();

        // With the store down, only the cache can answer.
        store.go_offline();
        let second = reader.read(ride.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn unknown_id_propagates_not_found() {
        let store = Arc::new(FakeStore::default());
        let cache = Arc::new(FakeCache::default());
        let reader = CacheAsideReader::new(store, cache, OP_TIMEOUT);

        let id = RideId::new();
        assert!(matches!(
            reader.read(id).await,
            Err(ReadError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn store_failure_propagates_and_does_not_populate() {
        let ride = closed_ride();
        let store = FakeStore::with_ride(&ride);
        store.go_offline();
        let cache = Arc::new(FakeCache::default());
        let reader = CacheAsideReader::new(store, cache.clone(), OP_TIMEOUT);

        assert!(matches!(
            reader.read(ride.id).await,
            Err(ReadError::Store(_))
        ));
        assert!(cache.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cache_outage_degrades_to_store_reads() {
        let ride = closed_ride();
        let store = FakeStore::with_ride(&ride);
        let reader = CacheAsideReader::new(store, FakeCache::broken(), OP_TIMEOUT);

        // Both the lookup and the populate fail; the read still succeeds.
        let bytes = reader.read(ride.id).await.unwrap();
        let snapshot: RideSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(snapshot.id, ride.id);
    }
}
