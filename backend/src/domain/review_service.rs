//! Review service implementing [`ReviewsCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ownership::{Authorization, OwnershipGuard, Resource};
use crate::domain::ports::{ListingRepository, ReviewRepository, ReviewsCommand, UserRepository};
use crate::domain::{Error, ListingId, Review, ReviewDraft, ReviewId, ReviewWithAuthor, UserId};

use super::service_errors::{
    map_listing_persistence_error, map_review_persistence_error, map_user_persistence_error,
};

/// Creates and deletes reviews.
pub struct ReviewService<L, U, R> {
    listings: Arc<L>,
    users: Arc<U>,
    reviews: Arc<R>,
    guard: OwnershipGuard<L, R>,
    clock: Arc<dyn Clock>,
}

impl<L, U, R> ReviewService<L, U, R>
where
    L: ListingRepository,
    R: ReviewRepository,
{
    /// Create the service.
    #[must_use]
    pub fn new(listings: Arc<L>, users: Arc<U>, reviews: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        let guard = OwnershipGuard::new(Arc::clone(&listings), Arc::clone(&reviews));
        Self {
            listings,
            users,
            reviews,
            guard,
            clock,
        }
    }
}

#[async_trait]
impl<L, U, R> ReviewsCommand for ReviewService<L, U, R>
where
    L: ListingRepository,
    U: UserRepository,
    R: ReviewRepository,
{
    async fn create_review(
        &self,
        author: &UserId,
        listing: &ListingId,
        draft: ReviewDraft,
    ) -> Result<ReviewWithAuthor, Error> {
        let exists = self
            .listings
            .find_by_id(listing)
            .await
            .map_err(map_listing_persistence_error)?
            .is_some();
        if !exists {
            return Err(Error::not_found("Listing not found"));
        }

        let ReviewDraft { rating, comment } = draft;
        let review = Review {
            id: ReviewId::random(),
            listing_id: *listing,
            author: author.clone(),
            rating,
            comment,
            created_at: self.clock.utc(),
        };
        self.reviews
            .insert(&review)
            .await
            .map_err(map_review_persistence_error)?;
        info!(review_id = %review.id, listing_id = %listing, author_id = %author, "review created");

        let author_profile = self
            .users
            .find_by_id(author)
            .await
            .map_err(map_user_persistence_error)?;
        Ok(ReviewWithAuthor {
            review,
            author_profile,
        })
    }

    async fn delete_review(
        &self,
        actor: &UserId,
        listing: &ListingId,
        review_id: &ReviewId,
    ) -> Result<(), Error> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await
            .map_err(map_review_persistence_error)?
            .filter(|review| review.listing_id == *listing)
            .ok_or_else(|| Error::not_found("Review not found"))?;

        let by_author = self
            .guard
            .authorize(Resource::Review(review.id), actor)
            .await?;
        if by_author == Authorization::Denied {
            self.guard
                .require(Resource::Listing(review.listing_id), actor)
                .await?;
        }

        let deleted = self
            .reviews
            .delete(review_id)
            .await
            .map_err(map_review_persistence_error)?;
        if !deleted {
            return Err(Error::not_found("Review not found"));
        }
        info!(review_id = %review_id, listing_id = %listing, actor_id = %actor, "review deleted");
        Ok(())
    }
}
