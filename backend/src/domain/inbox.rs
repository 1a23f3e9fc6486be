//! Notification inbox service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{DeleteOutcome, NotificationInbox, NotificationRepository};
use crate::domain::{Error, Notification, NotificationId, UserId};

use super::service_errors::map_notification_persistence_error;

/// Implements [`NotificationInbox`] over a notification store.
pub struct NotificationInboxService<N> {
    notifications: Arc<N>,
}

impl<N> NotificationInboxService<N> {
    /// Create the service.
    #[must_use]
    pub fn new(notifications: Arc<N>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl<N> NotificationInbox for NotificationInboxService<N>
where
    N: NotificationRepository,
{
    async fn list_notifications(&self, user: &UserId) -> Result<Vec<Notification>, Error> {
        self.notifications
            .list_for_owner(user)
            .await
            .map_err(map_notification_persistence_error)
    }

    async fn delete_notification(
        &self,
        user: &UserId,
        id: &NotificationId,
    ) -> Result<DeleteOutcome, Error> {
        let removed = self
            .notifications
            .delete(user, id)
            .await
            .map_err(map_notification_persistence_error)?;
        if removed {
            info!(user_id = %user, notification_id = %id, "notification deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            info!(
                user_id = %user,
                notification_id = %id,
                "notification already absent; treating delete as done"
            );
            Ok(DeleteOutcome::AlreadyAbsent)
        }
    }
}
