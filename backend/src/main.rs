//! Backend entry-point: loads settings, prepares storage and serves the
//! tender API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use tender_backend::inbound::http::health::HealthState;
use tender_backend::outbound::memory::MemorySeed;
use tender_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let mut config = ServerConfig::new(settings.bind_address());

    if let Some(url) = settings.database_url() {
        if settings.run_migrations {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else if let Some(path) = &settings.seed_file {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::other(format!("failed to read seed {}: {e}", path.display()))
        })?;
        let seed = MemorySeed::from_json(&raw).map_err(|e| {
            std::io::Error::other(format!("invalid seed {}: {e}", path.display()))
        })?;
        config = config.with_memory_seed(seed);
    }

    info!(bind_address = settings.bind_address(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
