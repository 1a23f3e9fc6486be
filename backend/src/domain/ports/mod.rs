//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the password hasher, the price predictor)
//! are implemented by outbound adapters. Driving ports are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod interest_command;
mod listing_repository;
mod listings_command;
mod listings_query;
mod notification_inbox;
mod notification_repository;
mod password_hasher;
mod price_estimate_query;
mod price_predictor;
mod review_repository;
mod reviews_command;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::AccountsCommand;
#[cfg(test)]
pub use interest_command::MockInterestCommand;
pub use interest_command::{InterestCommand, InterestOutcome};
#[cfg(test)]
pub use listing_repository::MockListingRepository;
pub use listing_repository::{ListingPersistenceError, ListingRepository};
#[cfg(test)]
pub use listings_command::MockListingsCommand;
pub use listings_command::ListingsCommand;
#[cfg(test)]
pub use listings_query::MockListingsQuery;
pub use listings_query::ListingsQuery;
#[cfg(test)]
pub use notification_inbox::MockNotificationInbox;
pub use notification_inbox::{DeleteOutcome, NotificationInbox};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{
    AppendOutcome, NotificationPersistenceError, NotificationRepository,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use price_estimate_query::MockPriceEstimateQuery;
pub use price_estimate_query::PriceEstimateQuery;
#[cfg(test)]
pub use price_predictor::MockPricePredictor;
pub use price_predictor::{PricePredictionError, PricePredictor};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewPersistenceError, ReviewRepository};
#[cfg(test)]
pub use reviews_command::MockReviewsCommand;
pub use reviews_command::ReviewsCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
