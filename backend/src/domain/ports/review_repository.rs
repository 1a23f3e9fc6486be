//! Port abstraction for review persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{ListingId, Review, ReviewId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
        /// The reviewed listing vanished before the insert.
        MissingListing { listing_id: String } => "listing {listing_id} does not exist",
    }
}

/// Driven port over stored reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a new review.
    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError>;

    /// Fetch a review by identifier.
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewPersistenceError>;

    /// Delete a review. Returns `false` when nothing was deleted.
    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewPersistenceError>;

    /// Reviews of a listing, oldest first.
    async fn list_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Review>, ReviewPersistenceError>;
}
