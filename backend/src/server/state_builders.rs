//! Builds the HTTP state over either PostgreSQL or the in-memory store.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use rentease::inbound::http::state::{HttpState, HttpStateAdapters};
use rentease::outbound::memory::InMemoryStore;
use rentease::outbound::password::Argon2PasswordHasher;
use rentease::outbound::persistence::{
    DbPool, DieselListingRepository, DieselNotificationRepository, DieselReviewRepository,
    DieselUserRepository,
};
use rentease::outbound::price::HttpPricePredictor;

use super::ServerConfig;

/// Wire the domain services over the configured adapters.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the price client cannot be constructed.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let predictor = Arc::new(
        HttpPricePredictor::new(&config.price_service_url, config.price_timeout).map_err(
            |err| std::io::Error::other(format!("price client construction failed: {err}")),
        )?,
    );
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let clock = Arc::new(DefaultClock);

    Ok(match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL persistence");
            diesel_state(pool, hasher, predictor, clock)
        }
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_adapters(HttpStateAdapters {
                users: Arc::clone(&store),
                listings: Arc::clone(&store),
                reviews: Arc::clone(&store),
                notifications: store,
                hasher,
                predictor,
                clock,
            })
        }
    })
}

fn diesel_state(
    pool: &DbPool,
    hasher: Arc<Argon2PasswordHasher>,
    predictor: Arc<HttpPricePredictor>,
    clock: Arc<DefaultClock>,
) -> HttpState {
    HttpState::from_adapters(HttpStateAdapters {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        listings: Arc::new(DieselListingRepository::new(pool.clone())),
        reviews: Arc::new(DieselReviewRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationRepository::new(pool.clone())),
        hasher,
        predictor,
        clock,
    })
}
