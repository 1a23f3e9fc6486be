//! Application settings loaded via OrthoConfig, and the assembled
//! [`ServerConfig`] handed to [`super::create_server`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use rentease::inbound::http::session_config::SessionSettings;
use rentease::outbound::persistence::DbPool;
use serde::Deserialize;
use url::Url;

const DEFAULT_PRICE_SERVICE_URL: &str = "http://localhost:8001";

/// Settings read from `RENTEASE_*` variables, configuration files, and the
/// command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RENTEASE")]
pub struct AppSettings {
    /// Listen address; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Listen port.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection string. Without one, data lives in memory and
    /// is lost on restart.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_pool_size: u32,
    /// Base URL of the price-prediction service.
    pub price_service_url: Option<String>,
    /// Timeout for price-prediction calls, in seconds.
    #[ortho_config(default = 10)]
    pub price_timeout_secs: u64,
}

impl AppSettings {
    /// Socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port,
        )
    }

    /// Parsed price service base URL.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured URL is malformed.
    pub fn price_service_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(
            self.price_service_url
                .as_deref()
                .unwrap_or(DEFAULT_PRICE_SERVICE_URL),
        )
    }

    /// Price-prediction call timeout.
    #[must_use]
    pub const fn price_timeout(&self) -> Duration {
        Duration::from_secs(self.price_timeout_secs)
    }
}

/// Everything the server needs at construction time.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) price_service_url: Url,
    pub(crate) price_timeout: Duration,
}

impl ServerConfig {
    /// Combine session settings with the listen address and price service.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        price_service_url: Url,
        price_timeout: Duration,
    ) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            price_service_url,
            price_timeout,
        }
    }

    /// Attach a database pool; without one the in-memory store is used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
