//! Driving port for reading and clearing an owner's inbox.

use async_trait::async_trait;

use crate::domain::{Error, Notification, NotificationId, UserId};

/// Outcome of deleting an inbox entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The entry was removed.
    Deleted,
    /// No such entry existed in this user's inbox.
    AlreadyAbsent,
}

/// Domain use-case port for the notification inbox.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// `user`'s notifications in registration order.
    async fn list_notifications(&self, user: &UserId) -> Result<Vec<Notification>, Error>;

    /// Remove one of `user`'s notifications. Entries of other inboxes are
    /// never touched.
    async fn delete_notification(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<DeleteOutcome, Error>;
}
