//! Interested-buyer notifications held in a listing owner's inbox.
//!
//! A notification is a snapshot: the listing title and the interested
//! user's contact details are copied at creation and never follow later
//! edits to either record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::listing::{Listing, ListingId};
use super::user::{User, UserId};

/// Notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

/// Raised when a notification id is not a UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("notification id must be a valid UUID")]
pub struct InvalidNotificationId;

impl NotificationId {
    /// Parse a notification identifier from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidNotificationId> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| InvalidNotificationId)
    }

    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Inbox entry telling an owner that somebody wants their listing.
///
/// ## Invariants
/// - At most one notification exists per
///   (`owner_id`, `listing_id`, `interested_user_id`).
/// - `owner_id` never equals `interested_user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: NotificationId,
    /// Inbox owner; the listing's owner at registration time.
    #[schema(value_type = String, format = Uuid)]
    pub owner_id: UserId,
    /// Listing the interest was registered on.
    #[schema(value_type = String, format = Uuid)]
    pub listing_id: ListingId,
    /// Listing title at registration time.
    pub listing_title: String,
    /// Interested user.
    #[schema(value_type = String, format = Uuid)]
    pub interested_user_id: UserId,
    /// Interested user's username.
    pub interested_user_name: String,
    /// Interested user's email.
    pub interested_user_email: String,
    /// Interested user's location.
    pub interested_user_location: String,
    /// Interested user's mobile number.
    pub interested_user_mobile: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Snapshot `interested` and `listing` into a new notification for the
    /// listing's owner.
    #[must_use]
    pub fn snapshot(
        id: NotificationId,
        listing: &Listing,
        interested: &User,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id: listing.owner.clone(),
            listing_id: listing.id,
            listing_title: listing.title.clone(),
            interested_user_id: interested.id().clone(),
            interested_user_name: interested.username().to_string(),
            interested_user_email: interested.email().to_string(),
            interested_user_location: interested.location().to_string(),
            interested_user_mobile: interested.mobile().to_string(),
            created_at: now,
        }
    }

    /// Whether this entry records `interested` on `listing`.
    #[must_use]
    pub fn concerns(&self, listing: &ListingId, interested: &UserId) -> bool {
        self.listing_id == *listing && self.interested_user_id == *interested
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::listing::{ListingDraft, ListingFields};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
    }

    #[rstest]
    fn snapshot_copies_listing_and_user_fields() {
        let draft = ListingDraft::try_from_fields(
            ListingFields {
                title: "Sea View Villa",
                description: "Facing the sea",
                price: 4500,
                location: "Calangute",
                country: "India",
                categories: &[],
            },
            None,
        )
        .expect("valid draft");
        let owner = UserId::random();
        let listing = Listing::create(ListingId::random(), owner.clone(), draft, now());
        let bob = User::try_from_strings(
            UserId::random().to_string(),
            "bob_b",
            "bob@example.com",
            "+91 98765 43210",
            "Pune",
        )
        .expect("valid user");

        let notification = Notification::snapshot(NotificationId::random(), &listing, &bob, now());

        assert_eq!(notification.owner_id, owner);
        assert_eq!(notification.listing_title, "Sea View Villa");
        assert_eq!(notification.interested_user_name, "bob_b");
        assert_eq!(notification.interested_user_location, "Pune");
        assert!(notification.concerns(&listing.id, bob.id()));
        assert!(!notification.concerns(&ListingId::random(), bob.id()));
    }

    #[rstest]
    fn rejects_malformed_identifier() {
        assert_eq!(NotificationId::new("nope"), Err(InvalidNotificationId));
    }
}
