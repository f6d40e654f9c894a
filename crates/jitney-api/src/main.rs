//! `jitney-httpd` binary: the ride-booking record service.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration (`JITNEY_CONFIG` file if set, else defaults),
//!    with environment overrides
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Connect to Redis
//! 5. Assemble the shared state (injected handles, no globals)
//! 6. Serve until `Ctrl-C`/SIGTERM, then drain and exit

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use jitney_api::config::ServiceConfig;
use jitney_api::server;
use jitney_api::state::AppState;
use jitney_core::auth::CredentialTable;
use jitney_db::{PgRideStore, PostgresConfig, PostgresPool, RedisRideCache};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("jitney-httpd starting");

    let config = load_config()?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        cache_ttl_secs = config.cache.ttl_secs,
        credentials = config.credentials.len(),
        "Configuration loaded"
    );

    let pg_config = PostgresConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections);
    let postgres = PostgresPool::connect(&pg_config).await?;
    postgres.run_migrations().await?;

    let cache = RedisRideCache::connect(
        &config.cache.url,
        Duration::from_secs(config.cache.ttl_secs),
    )
    .await?;

    let state = Arc::new(AppState::new(
        Arc::new(PgRideStore::new(postgres.pool().clone())),
        Arc::new(cache),
        CredentialTable::new(config.credentials.clone()),
        Duration::from_millis(config.cache.op_timeout_ms),
    ));

    server::serve(&config.server, state).await?;

    postgres.close().await;
    info!("jitney-httpd stopped");
    Ok(())
}

/// Load configuration from the `JITNEY_CONFIG` file when set, falling
/// back to defaults; environment overrides apply either way.
fn load_config() -> Result<ServiceConfig, jitney_api::config::ConfigError> {
    match std::env::var_os("JITNEY_CONFIG") {
        Some(path) => ServiceConfig::from_file(&PathBuf::from(path)),
        None => ServiceConfig::from_env(),
    }
}
