//! Driving port for registering interest in a listing.

use async_trait::async_trait;

use crate::domain::{Error, ListingId, Notification, UserId};

/// Outcome of an interest registration that reached the listing.
///
/// A missing listing is reported as a `not_found` [`Error`] rather than a
/// variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterestOutcome {
    /// A notification was appended to the owner's inbox.
    Registered(Notification),
    /// The owner's inbox already held this user's interest.
    AlreadyRegistered,
    /// The user owns the listing.
    SelfInterestRejected,
}

/// Domain use-case port for the interested-buyer workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterestCommand: Send + Sync {
    /// Tell the owner of `listing` that `interested` wants it.
    async fn register_interest(
        &self,
        listing: &ListingId,
        interested: &UserId,
    ) -> Result<InterestOutcome, Error>;
}
