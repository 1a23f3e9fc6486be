//! RentEase server entry-point: loads settings, prepares storage, and runs
//! the HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rentease::inbound::http::health::HealthState;
use rentease::inbound::http::session_config::fingerprint::key_fingerprint;
use rentease::inbound::http::session_config::{BuildMode, session_settings_from_env};
use rentease::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    let bind_addr = settings.bind_addr();
    let mut config = ServerConfig::new(
        session,
        bind_addr,
        settings
            .price_service_url()
            .wrap_err("invalid price service URL")?,
        settings.price_timeout(),
    );

    if let Some(database_url) = settings.database_url.as_deref() {
        run_migrations(database_url)
            .await
            .wrap_err("database migration failed")?;
        let pool_config = PoolConfig::new(database_url).with_max_size(settings.db_pool_size);
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("database pool construction failed")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("server startup failed")?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated with an error")
}
