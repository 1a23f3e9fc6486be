//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence layer. Conversions from rows are
//! fallible because the database may hold data that predates a validation
//! rule; such rows surface as query errors rather than panics.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Category, ImageRef, Listing, ListingId, Notification, NotificationId, PasswordHash, Price,
    Rating, Review, ReviewId, User, UserCredentials, UserId,
};

use super::schema::{listings, notifications, reviews, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub mobile: String,
    pub location: String,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, String> {
        User::try_from_strings(
            self.id.to_string(),
            self.username,
            self.email,
            self.mobile,
            self.location,
        )
        .map_err(|err| format!("stored user {} is invalid: {err}", self.id))
    }

    pub(crate) fn into_credentials(self) -> Result<UserCredentials, String> {
        let password_hash = PasswordHash::new(self.password_hash.clone());
        self.into_user().map(|user| UserCredentials {
            user,
            password_hash,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub mobile: &'a str,
    pub location: &'a str,
}

impl<'a> From<&'a UserCredentials> for NewUserRow<'a> {
    fn from(account: &'a UserCredentials) -> Self {
        let user = &account.user;
        Self {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            password_hash: account.password_hash.as_str(),
            email: user.email().as_ref(),
            mobile: user.mobile().as_ref(),
            location: user.location().as_ref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub location: String,
    pub country: String,
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub image_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ListingRow> for Listing {
    type Error = String;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid =
            |err: &dyn std::fmt::Display| format!("stored listing {id} is invalid: {err}");
        let categories = row
            .categories
            .iter()
            .map(|label| label.parse::<Category>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| invalid(&err))?;
        let image = row
            .image_url
            .map(|url| ImageRef::new(url, row.image_filename.unwrap_or_default()))
            .transpose()
            .map_err(|err| invalid(&err))?;
        Ok(Self {
            id: ListingId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            price: Price::new(i64::from(row.price)).map_err(|err| invalid(&err))?,
            location: row.location,
            country: row.country,
            categories,
            image,
            owner: UserId::from_uuid(row.owner_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable and changeset form of a listing.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = listings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ListingRecord<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub price: i32,
    pub location: &'a str,
    pub country: &'a str,
    pub categories: Vec<String>,
    pub image_url: Option<&'a str>,
    pub image_filename: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> TryFrom<&'a Listing> for ListingRecord<'a> {
    type Error = String;

    fn try_from(listing: &'a Listing) -> Result<Self, Self::Error> {
        let price = i32::try_from(listing.price.value())
            .map_err(|_| format!("price {} exceeds column range", listing.price.value()))?;
        Ok(Self {
            id: *listing.id.as_uuid(),
            owner_id: *listing.owner.as_uuid(),
            title: &listing.title,
            description: &listing.description,
            price,
            location: &listing.location,
            country: &listing.country,
            categories: listing.categories.iter().map(|c| c.label().to_owned()).collect(),
            image_url: listing.image.as_ref().map(|image| image.url.as_str()),
            image_filename: listing.image.as_ref().map(|image| image.filename.as_str()),
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub author_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            id: *review.id.as_uuid(),
            listing_id: *review.listing_id.as_uuid(),
            author_id: *review.author.as_uuid(),
            rating: i16::from(review.rating.value()),
            comment: review.comment.clone(),
            created_at: review.created_at,
        }
    }
}

impl TryFrom<ReviewRow> for Review {
    type Error = String;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::new(i64::from(row.rating))
            .map_err(|err| format!("stored review {} is invalid: {err}", row.id))?;
        Ok(Self {
            id: ReviewId::from_uuid(row.id),
            listing_id: ListingId::from_uuid(row.listing_id),
            author: UserId::from_uuid(row.author_id),
            rating,
            comment: row.comment,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub listing_id: Uuid,
    pub listing_title: String,
    pub interested_user_id: Uuid,
    pub interested_user_name: String,
    pub interested_user_email: String,
    pub interested_user_location: String,
    pub interested_user_mobile: String,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: NotificationId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            listing_id: ListingId::from_uuid(row.listing_id),
            listing_title: row.listing_title,
            interested_user_id: UserId::from_uuid(row.interested_user_id),
            interested_user_name: row.interested_user_name,
            interested_user_email: row.interested_user_email,
            interested_user_location: row.interested_user_location,
            interested_user_mobile: row.interested_user_mobile,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub listing_id: Uuid,
    pub listing_title: &'a str,
    pub interested_user_id: Uuid,
    pub interested_user_name: &'a str,
    pub interested_user_email: &'a str,
    pub interested_user_location: &'a str,
    pub interested_user_mobile: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Notification> for NewNotificationRow<'a> {
    fn from(notification: &'a Notification) -> Self {
        Self {
            id: *notification.id.as_uuid(),
            owner_id: *notification.owner_id.as_uuid(),
            listing_id: *notification.listing_id.as_uuid(),
            listing_title: &notification.listing_title,
            interested_user_id: *notification.interested_user_id.as_uuid(),
            interested_user_name: &notification.interested_user_name,
            interested_user_email: &notification.interested_user_email,
            interested_user_location: &notification.interested_user_location,
            interested_user_mobile: &notification.interested_user_mobile,
            created_at: notification.created_at,
        }
    }
}
