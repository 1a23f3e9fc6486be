//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected input becomes `400 invalid_request` with a
//! `{field, code}` details object so clients can highlight the culprit.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    CredentialsValidationError, Error, ListingId, ListingValidationError, NotificationId,
    PriceQueryValidationError, ReviewId, ReviewValidationError, UserValidationError,
};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(field, "missing_field", format!("missing required field: {name}"))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    Error::invalid_request(format!("{name} must be a valid UUID")).with_details(json!({
        "field": name,
        "value": value,
        "code": "invalid_uuid",
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_listing_id(value: &str) -> Result<ListingId, Error> {
    parse_uuid(value, FieldName::new("listingId")).map(ListingId::from_uuid)
}

pub(crate) fn parse_review_id(value: &str) -> Result<ReviewId, Error> {
    parse_uuid(value, FieldName::new("reviewId")).map(ReviewId::from_uuid)
}

pub(crate) fn parse_notification_id(value: &str) -> Result<NotificationId, Error> {
    parse_uuid(value, FieldName::new("notificationId")).map(NotificationId::from_uuid)
}

pub(crate) fn map_user_validation_error(err: &UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::EmptyId | UserValidationError::InvalidId => ("userId", "invalid_uuid"),
        UserValidationError::EmptyUsername => ("username", "empty_username"),
        UserValidationError::UsernameTooShort { .. } => ("username", "username_too_short"),
        UserValidationError::UsernameTooLong { .. } => ("username", "username_too_long"),
        UserValidationError::UsernameInvalidCharacters => ("username", "invalid_characters"),
        UserValidationError::InvalidEmail => ("email", "invalid_email"),
        UserValidationError::InvalidMobile => ("mobile", "invalid_mobile"),
        UserValidationError::EmptyLocation => ("location", "empty_location"),
    };
    field_error(FieldName::new(field), code, err.to_string())
}

pub(crate) fn map_credentials_validation_error(err: &CredentialsValidationError) -> Error {
    let (field, code) = match err {
        CredentialsValidationError::Profile(inner) => return map_user_validation_error(inner),
        CredentialsValidationError::EmptyUsername => ("username", "empty_username"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
        CredentialsValidationError::PasswordTooShort { .. } => ("password", "password_too_short"),
    };
    field_error(FieldName::new(field), code, err.to_string())
}

pub(crate) fn map_listing_validation_error(err: &ListingValidationError) -> Error {
    let (field, code) = match err {
        ListingValidationError::InvalidId => ("listingId", "invalid_uuid"),
        ListingValidationError::EmptyTitle => ("title", "empty_title"),
        ListingValidationError::EmptyDescription => ("description", "empty_description"),
        ListingValidationError::NonPositivePrice => ("price", "non_positive_price"),
        ListingValidationError::PriceTooLarge { .. } => ("price", "price_too_large"),
        ListingValidationError::EmptyLocation => ("location", "empty_location"),
        ListingValidationError::EmptyCountry => ("country", "empty_country"),
        ListingValidationError::UnknownCategory { .. } => ("category", "unknown_category"),
        ListingValidationError::EmptyImageUrl => ("image", "empty_image_url"),
        ListingValidationError::EmptySearchTerm => ("destination", "empty_destination"),
    };
    field_error(FieldName::new(field), code, err.to_string())
}

pub(crate) fn map_review_validation_error(err: &ReviewValidationError) -> Error {
    let (field, code) = match err {
        ReviewValidationError::InvalidId => ("reviewId", "invalid_uuid"),
        ReviewValidationError::RatingOutOfRange { .. } => ("rating", "rating_out_of_range"),
        ReviewValidationError::EmptyComment => ("comment", "empty_comment"),
    };
    field_error(FieldName::new(field), code, err.to_string())
}

pub(crate) fn map_price_query_validation_error(err: &PriceQueryValidationError) -> Error {
    match err {
        PriceQueryValidationError::EmptyLocation => {
            field_error(FieldName::new("location"), "empty_location", err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn details(err: &Error) -> (String, String) {
        let details = err.details().expect("details present");
        (
            details["field"].as_str().unwrap_or_default().to_owned(),
            details["code"].as_str().unwrap_or_default().to_owned(),
        )
    }

    #[rstest]
    fn invalid_path_id_names_field_and_value() {
        let err = parse_listing_id("not-a-uuid").expect_err("invalid");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "listingId must be a valid UUID");
        let details = err.details().expect("details present");
        assert_eq!(details["value"], "not-a-uuid");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    fn valid_path_id_parses() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = parse_review_id(raw).expect("valid");
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case(ListingValidationError::EmptyTitle, "title", "empty_title")]
    #[case(ListingValidationError::NonPositivePrice, "price", "non_positive_price")]
    #[case(
        ListingValidationError::UnknownCategory { value: "Caves".to_owned() },
        "category",
        "unknown_category"
    )]
    #[case(ListingValidationError::EmptySearchTerm, "destination", "empty_destination")]
    fn listing_errors_carry_field_and_code(
        #[case] err: ListingValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = map_listing_validation_error(&err);

        assert_eq!(mapped.message(), err.to_string());
        assert_eq!(details(&mapped), (field.to_owned(), code.to_owned()));
    }

    #[rstest]
    fn profile_errors_inside_credentials_use_profile_field() {
        let err = CredentialsValidationError::Profile(UserValidationError::InvalidEmail);

        let mapped = map_credentials_validation_error(&err);

        assert_eq!(details(&mapped), ("email".to_owned(), "invalid_email".to_owned()));
    }

    #[rstest]
    fn rating_out_of_range_mentions_bounds() {
        let err = ReviewValidationError::RatingOutOfRange { min: 1, max: 5 };

        let mapped = map_review_validation_error(&err);

        assert_eq!(mapped.message(), "rating must be between 1 and 5");
        assert_eq!(details(&mapped).0, "rating");
    }

    #[rstest]
    fn missing_field_message_names_field() {
        let err = missing_field_error(FieldName::new("destination"));
        assert_eq!(err.message(), "missing required field: destination");
    }
}
