//! Port abstraction for listing persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Category, Listing, ListingId, SearchTerm};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by listing repository adapters.
    pub enum ListingPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "listing repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "listing repository query failed: {message}",
    }
}

/// Driven port over stored listings.
///
/// Every list operation returns listings newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Insert a new listing.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingPersistenceError>;

    /// Overwrite the mutable fields of an existing listing. Returns `false`
    /// when the listing no longer exists.
    async fn update(&self, listing: &Listing) -> Result<bool, ListingPersistenceError>;

    /// Delete a listing and its reviews. Returns `false` when nothing was
    /// deleted.
    async fn delete(&self, id: &ListingId) -> Result<bool, ListingPersistenceError>;

    /// Fetch a listing by identifier.
    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingPersistenceError>;

    /// Every listing.
    async fn list_all(&self) -> Result<Vec<Listing>, ListingPersistenceError>;

    /// Listings tagged with `category`.
    async fn list_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Listing>, ListingPersistenceError>;

    /// Listings whose title, location, or country contains `term`.
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Listing>, ListingPersistenceError>;
}
