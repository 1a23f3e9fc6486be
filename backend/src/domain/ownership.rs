//! Ownership guard gating listing and review mutations.
//!
//! The guard is read-only. It answers whether an acting user owns a
//! resource; a missing resource is a `not_found` error, so callers can
//! distinguish 404 from 403.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{ListingRepository, ReviewRepository};
use crate::domain::{Error, ListingId, ReviewId, UserId};

use super::service_errors::{map_listing_persistence_error, map_review_persistence_error};

/// Message returned to clients when the guard denies a mutation.
pub const PERMISSION_DENIED_MESSAGE: &str = "You don't have permission to do that!";

/// What kind of resource is being guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Owned through `Listing::owner`.
    Listing,
    /// Owned through `Review::author`.
    Review,
}

/// A guarded resource: its kind and identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A listing.
    Listing(ListingId),
    /// A review.
    Review(ReviewId),
}

impl Resource {
    /// Kind of this resource.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Listing(_) => ResourceKind::Listing,
            Self::Review(_) => ResourceKind::Review,
        }
    }
}

/// Guard verdict for an existing resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The actor owns the resource.
    Allowed,
    /// The actor does not own the resource.
    Denied,
}

impl Authorization {
    /// Convert a denial into a `forbidden` error.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied => Err(Error::forbidden(PERMISSION_DENIED_MESSAGE)),
        }
    }
}

/// Checks resource ownership against the stores.
pub struct OwnershipGuard<L, R> {
    listings: Arc<L>,
    reviews: Arc<R>,
}

impl<L, R> Clone for OwnershipGuard<L, R> {
    fn clone(&self) -> Self {
        Self {
            listings: Arc::clone(&self.listings),
            reviews: Arc::clone(&self.reviews),
        }
    }
}

impl<L, R> OwnershipGuard<L, R>
where
    L: ListingRepository,
    R: ReviewRepository,
{
    /// Create a guard over the listing and review stores.
    #[must_use]
    pub fn new(listings: Arc<L>, reviews: Arc<R>) -> Self {
        Self { listings, reviews }
    }

    /// Decide whether `actor` owns `resource`.
    ///
    /// Identity comparison uses canonical UUID equality, never string
    /// formatting.
    pub async fn authorize(
        &self,
        resource: Resource,
        actor: &UserId,
    ) -> Result<Authorization, Error> {
        let owner = match resource {
            Resource::Listing(id) => self
                .listings
                .find_by_id(&id)
                .await
                .map_err(map_listing_persistence_error)?
                .map(|listing| listing.owner)
                .ok_or_else(|| Error::not_found("Listing not found"))?,
            Resource::Review(id) => self
                .reviews
                .find_by_id(&id)
                .await
                .map_err(map_review_persistence_error)?
                .map(|review| review.author)
                .ok_or_else(|| Error::not_found("Review not found"))?,
        };

        let verdict = if owner == *actor {
            Authorization::Allowed
        } else {
            Authorization::Denied
        };
        debug!(
            kind = ?resource.kind(),
            actor = %actor,
            ?verdict,
            "ownership checked"
        );
        Ok(verdict)
    }

    /// Like [`OwnershipGuard::authorize`] but fails with `forbidden` on
    /// denial.
    pub async fn require(&self, resource: Resource, actor: &UserId) -> Result<(), Error> {
        self.authorize(resource, actor).await?.into_result()
    }
}
