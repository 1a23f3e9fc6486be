//! PostgreSQL-backed [`NotificationRepository`].
//!
//! Duplicate registrations are resolved by the
//! `notifications_owner_listing_interested_key` constraint: the insert uses
//! `ON CONFLICT DO NOTHING`, so concurrent requests for the same triple
//! yield exactly one row and every other caller sees
//! [`AppendOutcome::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AppendOutcome, NotificationPersistenceError, NotificationRepository};
use crate::domain::{ListingId, Notification, NotificationId, UserId};

use super::diesel_helpers::{DbFailure, classify_diesel_error};
use super::models::{NewNotificationRow, NotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::notifications;

/// Diesel implementation of the notification inbox store.
#[derive(Clone)]
pub struct DieselNotificationRepository {
    pool: DbPool,
}

impl DieselNotificationRepository {
    /// Create a repository over `pool`.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> NotificationPersistenceError {
    NotificationPersistenceError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &'static str,
) -> NotificationPersistenceError {
    match classify_diesel_error(error, operation) {
        DbFailure::Connection(message) => NotificationPersistenceError::connection(message),
        DbFailure::UniqueViolation { .. } | DbFailure::ForeignKeyViolation { .. } => {
            NotificationPersistenceError::query("constraint violation")
        }
        DbFailure::Query(message) => NotificationPersistenceError::query(message),
    }
}

fn append_outcome(inserted_rows: usize) -> AppendOutcome {
    if inserted_rows == 0 {
        AppendOutcome::Duplicate
    } else {
        AppendOutcome::Appended
    }
}

#[async_trait]
impl NotificationRepository for DieselNotificationRepository {
    async fn contains(
        &self,
        owner: &UserId,
        listing: &ListingId,
        interested: &UserId,
    ) -> Result<bool, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            notifications::table
                .filter(notifications::owner_id.eq(owner.as_uuid()))
                .filter(notifications::listing_id.eq(listing.as_uuid()))
                .filter(notifications::interested_user_id.eq(interested.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "check notification"))
    }

    async fn append_if_absent(
        &self,
        notification: &Notification,
    ) -> Result<AppendOutcome, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(notifications::table)
            .values(NewNotificationRow::from(notification))
            .on_conflict((
                notifications::owner_id,
                notifications::listing_id,
                notifications::interested_user_id,
            ))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "append notification"))?;
        Ok(append_outcome(inserted))
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Notification>, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::owner_id.eq(owner.as_uuid()))
            .select(NotificationRow::as_select())
            .order(notifications::position.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list notifications"))?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: &NotificationId,
    ) -> Result<bool, NotificationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            notifications::table
                .filter(notifications::id.eq(id.as_uuid()))
                .filter(notifications::owner_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "delete notification"))?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, AppendOutcome::Duplicate)]
    #[case(1, AppendOutcome::Appended)]
    fn conflict_skip_is_reported_as_duplicate(
        #[case] inserted: usize,
        #[case] expected: AppendOutcome,
    ) {
        assert_eq!(append_outcome(inserted), expected);
    }

    #[rstest]
    fn pool_checkout_failure_is_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, NotificationPersistenceError::connection("timed out"));
    }
}
