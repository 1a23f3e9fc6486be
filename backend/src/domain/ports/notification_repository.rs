//! Port abstraction for the per-owner notification inbox store.
use async_trait::async_trait;

use crate::domain::{ListingId, Notification, NotificationId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by notification repository adapters.
    pub enum NotificationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "notification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification repository query failed: {message}",
    }
}

/// Result of an insert-if-absent append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The notification was stored.
    Appended,
    /// The owner's inbox already records this user's interest in this
    /// listing; nothing was stored.
    Duplicate,
}

/// Driven port over owner inboxes.
///
/// Adapters must enforce uniqueness of (owner, listing, interested user)
/// atomically inside [`NotificationRepository::append_if_absent`]; two
/// concurrent appends for the same triple store exactly one record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Whether `owner`'s inbox records `interested`'s interest in `listing`.
    async fn contains(
        &self,
        owner: &UserId,
        listing: &ListingId,
        interested: &UserId,
    ) -> Result<bool, NotificationPersistenceError>;

    /// Store `notification` unless its triple is already present.
    async fn append_if_absent(
        &self,
        notification: &Notification,
    ) -> Result<AppendOutcome, NotificationPersistenceError>;

    /// `owner`'s inbox in insertion order.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Notification>, NotificationPersistenceError>;

    /// Remove one entry of `owner`'s inbox. Returns `false` when no such
    /// entry exists for that owner.
    async fn delete(
        &self,
        owner: &UserId,
        id: &NotificationId,
    ) -> Result<bool, NotificationPersistenceError>;
}
