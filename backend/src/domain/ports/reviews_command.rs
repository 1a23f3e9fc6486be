//! Driving port for review mutations.

use async_trait::async_trait;

use crate::domain::{Error, ListingId, ReviewDraft, ReviewId, ReviewWithAuthor, UserId};

/// Domain use-case port for reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewsCommand: Send + Sync {
    /// Add a review by `author` to `listing`.
    async fn create_review(
        &self,
        author: &UserId,
        listing: &ListingId,
        draft: ReviewDraft,
    ) -> Result<ReviewWithAuthor, Error>;

    /// Remove a review. Allowed for its author and for the listing owner.
    async fn delete_review(
        &self,
        actor: &UserId,
        listing: &ListingId,
        review: &ReviewId,
    ) -> Result<(), Error>;
}
