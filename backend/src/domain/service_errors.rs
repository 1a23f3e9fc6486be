//! Mapping from driven-port errors to [`Error`].
//!
//! Connection failures become `service_unavailable`; query failures become
//! `internal_error` (redacted at the HTTP edge).

use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{
    ListingPersistenceError, NotificationPersistenceError, PasswordHashError,
    PricePredictionError, ReviewPersistenceError, UserPersistenceError,
};

pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => {
            Error::conflict("A user with the given username is already registered")
                .with_details(json!({ "field": "username", "value": username }))
        }
    }
}

pub(crate) fn map_listing_persistence_error(error: ListingPersistenceError) -> Error {
    match error {
        ListingPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("listing repository unavailable: {message}"))
        }
        ListingPersistenceError::Query { message } => {
            Error::internal(format!("listing repository error: {message}"))
        }
    }
}

pub(crate) fn map_review_persistence_error(error: ReviewPersistenceError) -> Error {
    match error {
        ReviewPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewPersistenceError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
        ReviewPersistenceError::MissingListing { .. } => Error::not_found("Listing not found"),
    }
}

pub(crate) fn map_notification_persistence_error(error: NotificationPersistenceError) -> Error {
    match error {
        NotificationPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationPersistenceError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

pub(crate) fn map_password_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_price_prediction_error(error: PricePredictionError) -> Error {
    match error {
        PricePredictionError::Rejected { message } => Error::invalid_request(message),
        PricePredictionError::Transport { .. }
        | PricePredictionError::Status { .. }
        | PricePredictionError::Decode { .. } => {
            Error::service_unavailable("Failed to get price prediction from the pricing service")
                .with_details(json!({ "cause": error.to_string() }))
        }
    }
}
