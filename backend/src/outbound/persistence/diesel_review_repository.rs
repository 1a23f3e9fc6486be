//! PostgreSQL-backed [`ReviewRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReviewPersistenceError, ReviewRepository};
use crate::domain::{ListingId, Review, ReviewId};

use super::diesel_helpers::{DbFailure, classify_diesel_error, collect_rows};
use super::models::ReviewRow;
use super::pool::{DbPool, PoolError};
use super::schema::reviews;

/// Diesel implementation of the review store.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a repository over `pool`.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewPersistenceError {
    ReviewPersistenceError::connection(error.into_message())
}

/// `listing_id` names the listing whose absence a foreign key failure means.
fn map_diesel_error(
    error: diesel::result::Error,
    operation: &'static str,
    listing_id: Option<&ListingId>,
) -> ReviewPersistenceError {
    match (classify_diesel_error(error, operation), listing_id) {
        (DbFailure::ForeignKeyViolation { constraint }, Some(listing_id))
            if constraint
                .as_deref()
                .is_none_or(|name| name.contains("listing_id")) =>
        {
            ReviewPersistenceError::missing_listing(listing_id.to_string())
        }
        (DbFailure::Connection(message), _) => ReviewPersistenceError::connection(message),
        (DbFailure::Query(message), _) => ReviewPersistenceError::query(message),
        (DbFailure::UniqueViolation { .. } | DbFailure::ForeignKeyViolation { .. }, _) => {
            ReviewPersistenceError::query("constraint violation")
        }
    }
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &Review) -> Result<(), ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reviews::table)
            .values(ReviewRow::from(review))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert review", Some(&review.listing_id)))
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ReviewRow> = reviews::table
            .find(id.as_uuid())
            .select(ReviewRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find review", None))?;
        row.map(Review::try_from)
            .transpose()
            .map_err(ReviewPersistenceError::query)
    }

    async fn delete(&self, id: &ReviewId) -> Result<bool, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(reviews::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete review", None))?;
        Ok(deleted > 0)
    }

    async fn list_for_listing(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::listing_id.eq(listing_id.as_uuid()))
            .select(ReviewRow::as_select())
            .order((reviews::created_at.asc(), reviews::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list reviews", None))?;
        collect_rows(
            rows.into_iter().map(Review::try_from),
            ReviewPersistenceError::query,
        )
    }
}
