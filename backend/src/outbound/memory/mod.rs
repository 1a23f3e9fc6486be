//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by the integration tests.
//! All tables live behind one `tokio` read/write lock so each port call is
//! atomic; in particular `append_if_absent` checks and inserts under the
//! same write guard, which is what keeps duplicate interest registrations
//! out of an inbox under concurrent requests.
//!
//! Deleting a listing removes its reviews, mirroring the database's
//! cascading foreign key. Notifications are snapshots and are kept.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{
    AppendOutcome, ListingPersistenceError, ListingRepository, NotificationPersistenceError,
    NotificationRepository, ReviewPersistenceError, ReviewRepository, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    Category, Listing, ListingId, Notification, NotificationId, Review, ReviewId, SearchTerm,
    User, UserCredentials, UserId,
};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, UserCredentials>,
    /// Insertion order.
    listings: Vec<Listing>,
    /// Insertion order.
    reviews: Vec<Review>,
    /// Per-owner inbox in insertion order.
    inboxes: HashMap<Uuid, Vec<Notification>>,
}

impl Tables {
    /// Listings matching `keep`, newest first.
    fn listings_where(&self, keep: impl Fn(&Listing) -> bool) -> Vec<Listing> {
        let mut found: Vec<Listing> = self
            .listings
            .iter()
            .rev()
            .filter(|listing| keep(listing))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

/// Shared in-memory marketplace store; clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, account: &UserCredentials) -> Result<(), UserPersistenceError> {
        let mut tables = self.tables.write().await;
        let username = account.user.username();
        if tables
            .users
            .values()
            .any(|existing| existing.user.username() == username)
        {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        tables
            .users
            .insert(*account.user.id().as_uuid(), account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .get(id.as_uuid())
            .map(|account| account.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|account| account.user.username().as_ref() == username)
            .cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id.as_uuid()))
            .map(|account| account.user.clone())
            .collect())
    }
}

#[async_trait]
impl ListingRepository for InMemoryStore {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingPersistenceError> {
        self.tables.write().await.listings.push(listing.clone());
        Ok(())
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingPersistenceError> {
        let mut tables = self.tables.write().await;
        let Some(slot) = tables
            .listings
            .iter_mut()
            .find(|existing| existing.id == listing.id)
        else {
            return Ok(false);
        };
        *slot = listing.clone();
        Ok(true)
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingPersistenceError> {
        let mut tables = self.tables.write().await;
        let before = tables.listings.len();
        tables.listings.retain(|listing| listing.id != *id);
        let removed = tables.listings.len() < before;
        if removed {
            tables.reviews.retain(|review| review.listing_id != *id);
        }
        Ok(removed)
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .listings
            .iter()
            .find(|listing| listing.id == *id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Listing>, ListingPersistenceError> {
        Ok(self.tables.read().await.listings_where(|_| true))
    }

    async fn list_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Listing>, ListingPersistenceError> {
        Ok(self
            .tables
            .read()
            .await
            .listings_where(|listing| listing.categories.contains(&category)))
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Listing>, ListingPersistenceError> {
        Ok(self
            .tables
            .read()
            .await
            .listings_where(|listing| term.matches(listing)))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError> {
        let mut tables = self.tables.write().await;
        if !tables
            .listings
            .iter()
            .any(|listing| listing.id == review.listing_id)
        {
            return Err(ReviewPersistenceError::missing_listing(
                review.listing_id.to_string(),
            ));
        }
        tables.reviews.push(review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().find(|review| review.id == *id).cloned())
    }

    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewPersistenceError> {
        let mut tables = self.tables.write().await;
        let before = tables.reviews.len();
        tables.reviews.retain(|review| review.id != *id);
        Ok(tables.reviews.len() < before)
    }

    async fn list_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|review| review.listing_id == *listing_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn contains(
        &self,
        owner: &UserId,
        listing: &ListingId,
        interested: &UserId,
    ) -> Result<bool, NotificationPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.inboxes.get(owner.as_uuid()).is_some_and(|inbox| {
            inbox
                .iter()
                .any(|notification| notification.concerns(listing, interested))
        }))
    }

    async fn append_if_absent(
        &self,
        notification: &Notification,
    ) -> Result<AppendOutcome, NotificationPersistenceError> {
        let mut tables = self.tables.write().await;
        let inbox = tables
            .inboxes
            .entry(*notification.owner_id.as_uuid())
            .or_default();
        if inbox.iter().any(|existing| {
            existing.concerns(&notification.listing_id, &notification.interested_user_id)
        }) {
            return Ok(AppendOutcome::Duplicate);
        }
        inbox.push(notification.clone());
        Ok(AppendOutcome::Appended)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables
            .inboxes
            .get(owner.as_uuid())
            .cloned()
            .unwrap_or_default())
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: &NotificationId,
    ) -> Result<bool, NotificationPersistenceError> {
        let mut tables = self.tables.write().await;
        let Some(inbox) = tables.inboxes.get_mut(owner.as_uuid()) else {
            return Ok(false);
        };
        let before = inbox.len();
        inbox.retain(|notification| notification.id != *id);
        Ok(inbox.len() < before)
    }
}
