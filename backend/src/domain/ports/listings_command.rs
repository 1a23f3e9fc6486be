//! Driving port for listing mutations.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingDraft, ListingId, UserId};

/// Domain use-case port for creating, editing, and removing listings.
///
/// Edits and removals are gated by the ownership guard: a missing listing is
/// `not_found`, another user's listing is `forbidden`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsCommand: Send + Sync {
    /// Create a listing owned by `owner`.
    async fn create_listing(&self, owner: &UserId, draft: ListingDraft) -> Result<Listing, Error>;

    /// Replace the content of `id`. The image is kept unless `draft` has one.
    async fn update_listing(
        &self,
        actor: &UserId,
        id: &ListingId,
        draft: ListingDraft,
    ) -> Result<Listing, Error>;

    /// Delete `id` and its reviews.
    async fn delete_listing(&self, actor: &UserId, id: &ListingId) -> Result<(), Error>;
}
