//! Interested-buyer workflow.
//!
//! Registering interest appends a snapshot notification to the listing
//! owner's inbox, at most once per (listing, interested user). The
//! pre-check keeps the common duplicate path read-only; the store's
//! insert-if-absent settles concurrent registrations.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AppendOutcome, InterestCommand, InterestOutcome, ListingRepository, NotificationRepository,
    UserRepository,
};
use crate::domain::{Error, ListingId, Notification, NotificationId, UserId};

use super::service_errors::{
    map_listing_persistence_error, map_notification_persistence_error,
    map_user_persistence_error,
};

/// Implements [`InterestCommand`] over the listing, user, and notification
/// stores.
pub struct InterestRegistrationService<L, U, N> {
    listings: Arc<L>,
    users: Arc<U>,
    notifications: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<L, U, N> InterestRegistrationService<L, U, N> {
    /// Create the service.
    #[must_use]
    pub fn new(
        listings: Arc<L>,
        users: Arc<U>,
        notifications: Arc<N>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            listings,
            users,
            notifications,
            clock,
        }
    }
}

#[async_trait]
impl<L, U, N> InterestCommand for InterestRegistrationService<L, U, N>
where
    L: ListingRepository,
    U: UserRepository,
    N: NotificationRepository,
{
    async fn register_interest(
        &self,
        listing_id: &ListingId,
        interested: &UserId,
    ) -> Result<InterestOutcome, Error> {
        let listing = self
            .listings
            .find_by_id(listing_id)
            .await
            .map_err(map_listing_persistence_error)?
            .ok_or_else(|| Error::not_found("Listing not found"))?;

        if listing.owner == *interested {
            info!(listing_id = %listing.id, user_id = %interested, "self-interest rejected");
            return Ok(InterestOutcome::SelfInterestRejected);
        }

        let already = self
            .notifications
            .contains(&listing.owner, &listing.id, interested)
            .await
            .map_err(map_notification_persistence_error)?;
        if already {
            info!(listing_id = %listing.id, user_id = %interested, "interest already registered");
            return Ok(InterestOutcome::AlreadyRegistered);
        }

        let user = self
            .users
            .find_by_id(interested)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized("login required"))?;

        let notification =
            Notification::snapshot(NotificationId::random(), &listing, &user, self.clock.utc());
        let outcome = self
            .notifications
            .append_if_absent(&notification)
            .await
            .map_err(map_notification_persistence_error)?;

        match outcome {
            AppendOutcome::Appended => {
                info!(
                    listing_id = %listing.id,
                    owner_id = %listing.owner,
                    user_id = %interested,
                    notification_id = %notification.id,
                    "interest registered"
                );
                Ok(InterestOutcome::Registered(notification))
            }
            AppendOutcome::Duplicate => {
                info!(
                    listing_id = %listing.id,
                    user_id = %interested,
                    "interest registered concurrently; keeping existing notification"
                );
                Ok(InterestOutcome::AlreadyRegistered)
            }
        }
    }
}
