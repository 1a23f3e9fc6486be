//! Listing service implementing the listing driving ports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ownership::{OwnershipGuard, Resource};
use crate::domain::ports::{
    ListingRepository, ListingsCommand, ListingsQuery, ReviewRepository, UserRepository,
};
use crate::domain::{
    Category, Error, Listing, ListingDetail, ListingDraft, ListingId, ReviewWithAuthor,
    SearchTerm, User, UserId,
};

use super::service_errors::{
    map_listing_persistence_error, map_review_persistence_error, map_user_persistence_error,
};

/// Listing reads and owner-gated mutations.
pub struct ListingService<L, U, R> {
    listings: Arc<L>,
    users: Arc<U>,
    reviews: Arc<R>,
    guard: OwnershipGuard<L, R>,
    clock: Arc<dyn Clock>,
}

impl<L, U, R> ListingService<L, U, R>
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

impl<L, U, R> ListingService<L, U, R>
where
    L: ListingRepository,
    U: UserRepository,
    R: ReviewRepository,
{
    async fn load(&self, id: &ListingId) -> Result<Listing, Error> {
        self.listings
            .find_by_id(id)
            .await
            .map_err(map_listing_persistence_error)?
            .ok_or_else(|| Error::not_found("Listing not found"))
    }
}

#[async_trait]
impl<L, U, R> ListingsQuery for ListingService<L, U, R>
where
    L: ListingRepository,
    U: UserRepository,
    R: ReviewRepository,
{
    async fn list_listings(&self) -> Result<Vec<Listing>, Error> {
        self.listings
            .list_all()
            .await
            .map_err(map_listing_persistence_error)
    }

    async fn listings_by_category(&self, category: Category) -> Result<Vec<Listing>, Error> {
        self.listings
            .list_by_category(category)
            .await
            .map_err(map_listing_persistence_error)
    }

    async fn search_listings(&self, term: &SearchTerm) -> Result<Vec<Listing>, Error> {
        self.listings
            .search(term)
            .await
            .map_err(map_listing_persistence_error)
    }

    async fn show_listing(&self, id: &ListingId) -> Result<ListingDetail, Error> {
        let listing = self.load(id).await?;
        let reviews = self
            .reviews
            .list_for_listing(id)
            .await
            .map_err(map_review_persistence_error)?;

        let mut wanted = vec![listing.owner.clone()];
        for review in &reviews {
            if !wanted.contains(&review.author) {
                wanted.push(review.author.clone());
            }
        }
        let profiles: HashMap<UserId, User> = self
            .users
            .find_many(&wanted)
            .await
            .map_err(map_user_persistence_error)?
            .into_iter()
            .map(|user| (user.id().clone(), user))
            .collect();

        let owner_profile = profiles.get(&listing.owner).cloned();
        let reviews = reviews
            .into_iter()
            .map(|review| ReviewWithAuthor {
                author_profile: profiles.get(&review.author).cloned(),
                review,
            })
            .collect();

        Ok(ListingDetail {
            listing,
            owner_profile,
            reviews,
        })
    }
}

#[async_trait]
impl<L, U, R> ListingsCommand for ListingService<L, U, R>
where
    L: ListingRepository,
    U: UserRepository,
    R: ReviewRepository,
{
    async fn create_listing(&self, owner: &UserId, draft: ListingDraft) -> Result<Listing, Error> {
        let listing = Listing::create(ListingId::random(), owner.clone(), draft, self.clock.utc());
        self.listings
            .insert(&listing)
            .await
            .map_err(map_listing_persistence_error)?;
        info!(listing_id = %listing.id, owner_id = %owner, "listing created");
        Ok(listing)
    }

    async fn update_listing(
        &self,
        actor: &UserId,
        id: &ListingId,
        draft: ListingDraft,
    ) -> Result<Listing, Error> {
        self.guard.require(Resource::Listing(*id), actor).await?;
        let revised = self.load(id).await?.revise(draft, self.clock.utc());
        let updated = self
            .listings
            .update(&revised)
            .await
            .map_err(map_listing_persistence_error)?;
        if !updated {
            return Err(Error::not_found("Listing not found"));
        }
        info!(listing_id = %id, actor_id = %actor, "listing updated");
        Ok(revised)
    }

    async fn delete_listing(&self, actor: &UserId, id: &ListingId) -> Result<(), Error> {
        self.guard.require(Resource::Listing(*id), actor).await?;
        let deleted = self
            .listings
            .delete(id)
            .await
            .map_err(map_listing_persistence_error)?;
        if !deleted {
            return Err(Error::not_found("Listing not found"));
        }
        info!(listing_id = %id, actor_id = %actor, "listing deleted");
        Ok(())
    }
}
