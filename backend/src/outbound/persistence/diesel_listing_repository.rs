//! PostgreSQL-backed [`ListingRepository`].
//!
//! Listings are always returned newest first. Destination search is a
//! case-insensitive substring match over title, location, and country.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ListingPersistenceError, ListingRepository};
use crate::domain::{Category, Listing, ListingId, SearchTerm};

use super::diesel_helpers::{DbFailure, classify_diesel_error, collect_rows};
use super::models::{ListingRecord, ListingRow};
use super::pool::{DbPool, PoolError};
use super::schema::listings;

/// Diesel implementation of the listing store.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a repository over `pool`.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load(
        &self,
        query: listings::BoxedQuery<'_, diesel::pg::Pg>,
        operation: &'static str,
    ) -> Result<Vec<Listing>, ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ListingRow> = query
            .select(ListingRow::as_select())
            .order((listings::created_at.desc(), listings::id.asc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, operation))?;
        collect_rows(
            rows.into_iter().map(Listing::try_from),
            ListingPersistenceError::query,
        )
    }
}

fn map_pool_error(error: PoolError) -> ListingPersistenceError {
    ListingPersistenceError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &'static str,
) -> ListingPersistenceError {
    match classify_diesel_error(error, operation) {
        DbFailure::Connection(message) => ListingPersistenceError::connection(message),
        DbFailure::UniqueViolation { .. } | DbFailure::ForeignKeyViolation { .. } => {
            ListingPersistenceError::query("constraint violation")
        }
        DbFailure::Query(message) => ListingPersistenceError::query(message),
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingPersistenceError> {
        let record = ListingRecord::try_from(listing).map_err(ListingPersistenceError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(listings::table)
            .values(&record)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, "insert listing"))
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingPersistenceError> {
        let record = ListingRecord::try_from(listing).map_err(ListingPersistenceError::query)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(listings::table.find(listing.id.as_uuid()))
            .set(&record)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "update listing"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(listings::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete listing"))?;
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ListingRow> = listings::table
            .find(id.as_uuid())
            .select(ListingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find listing"))?;
        row.map(Listing::try_from)
            .transpose()
            .map_err(ListingPersistenceError::query)
    }

    async fn list_all(&self) -> Result<Vec<Listing>, ListingPersistenceError> {
        self.load(listings::table.into_boxed(), "list listings").await
    }

    async fn list_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Listing>, ListingPersistenceError> {
        let query = listings::table
            .filter(listings::categories.contains(vec![category.label().to_owned()]))
            .into_boxed();
        self.load(query, "list listings by category").await
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Listing>, ListingPersistenceError> {
        let pattern = contains_pattern(term.as_str());
        let query = listings::table
            .filter(
                listings::title
                    .ilike(pattern.clone())
                    .or(listings::location.ilike(pattern.clone()))
                    .or(listings::country.ilike(pattern)),
            )
            .into_boxed();
        self.load(query, "search listings").await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("goa", "%goa%")]
    #[case("100%", "%100\\%%")]
    #[case("sea_view", "%sea\\_view%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn search_pattern_escapes_wildcards(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(needle), expected);
    }

    #[rstest]
    fn constraint_failures_become_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound, "find listing");
        assert_eq!(err, ListingPersistenceError::query("record not found"));
    }
}
