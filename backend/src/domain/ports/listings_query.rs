//! Driving port for browsing listings.

use async_trait::async_trait;

use crate::domain::{Category, Error, Listing, ListingDetail, ListingId, SearchTerm};

/// Domain use-case port for listing reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsQuery: Send + Sync {
    /// Every listing, newest first.
    async fn list_listings(&self) -> Result<Vec<Listing>, Error>;

    /// Listings tagged with `category`, newest first.
    async fn listings_by_category(&self, category: Category) -> Result<Vec<Listing>, Error>;

    /// Listings matching a destination, newest first. No match is an empty
    /// list.
    async fn search_listings(&self, term: &SearchTerm) -> Result<Vec<Listing>, Error>;

    /// One listing with its owner and reviews.
    async fn show_listing(&self, id: &ListingId) -> Result<ListingDetail, Error>;
}
