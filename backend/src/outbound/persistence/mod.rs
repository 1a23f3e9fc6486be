//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the driven repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` pooling.
//!
//! - Repositories only translate between row structs and domain types.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never
//!   leave this module.
//! - Every Diesel or pool failure is mapped to the owning port's error.
//!
//! # Example
//!
//! ```no_run
//! use rentease::outbound::persistence::{DbPool, DieselListingRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), rentease::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rentease")).await?;
//! let listings = DieselListingRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_helpers;
mod diesel_listing_repository;
mod diesel_notification_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_listing_repository::DieselListingRepository;
pub use diesel_notification_repository::DieselNotificationRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
