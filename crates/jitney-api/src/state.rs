//! Shared application state for the API server.
//!
//! All handles are injected at startup and shared behind [`Arc`]; there
//! is no process-wide singleton state. Tests inject in-memory fakes
//! through the same constructor the binary uses for the real stores.

use std::sync::Arc;
use std::time::Duration;

use jitney_core::auth::CredentialTable;
use jitney_db::{CacheAsideReader, RideCache, RideStore};

/// Handles shared by every request task.
pub struct AppState {
    /// Authoritative ride store.
    pub store: Arc<dyn RideStore>,
    /// Best-effort ride cache.
    pub cache: Arc<dyn RideCache>,
    /// Cache-aside coordinator for the hot read.
    pub reader: CacheAsideReader,
    /// Credential table consulted per request by the context extractor.
    pub credentials: CredentialTable,
}

impl AppState {
    /// Assemble the state from injected store and cache handles.
    ///
    /// `cache_op_timeout` bounds each cache operation on the read path.
    pub fn new(
        store: Arc<dyn RideStore>,
        cache: Arc<dyn RideCache>,
        credentials: CredentialTable,
        cache_op_timeout: Duration,
    ) -> Self {
        let reader = CacheAsideReader::new(Arc::clone(&store), Arc::clone(&cache), cache_op_timeout);
        Self {
            store,
            cache,
            reader,
            credentials,
        }
    }
}
