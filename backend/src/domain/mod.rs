//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, and the services implementing the driving ports.
//! Keep types immutable where possible and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User, Listing, Review, Notification: aggregates.
//! - OwnershipGuard: read-only ownership checks before mutations.
//! - InterestRegistrationService / NotificationInboxService: the
//!   interested-buyer workflow and the owner's inbox.
//! - ListingService, ReviewService, AccountService, PriceEstimateService.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod inbox;
pub mod interest;
pub mod listing;
pub mod listing_service;
pub mod notification;
pub mod ownership;
pub mod ports;
pub mod price_service;
pub mod pricing;
pub mod review;
pub mod review_service;
mod service_errors;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account_service::AccountService;
pub use self::auth::{
    CredentialsValidationError, LoginCredentials, PASSWORD_MIN, PasswordHash, SignupDetails,
    SignupFields, UserCredentials,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::inbox::NotificationInboxService;
pub use self::interest::InterestRegistrationService;
pub use self::listing::{
    Category, ImageRef, Listing, ListingDetail, ListingDraft, ListingFields, ListingId,
    ListingValidationError, Price, SearchTerm,
};
pub use self::listing_service::ListingService;
pub use self::notification::{InvalidNotificationId, Notification, NotificationId};
pub use self::ownership::{
    Authorization, OwnershipGuard, PERMISSION_DENIED_MESSAGE, Resource, ResourceKind,
};
pub use self::price_service::PriceEstimateService;
pub use self::pricing::{PredictedPrice, PriceQuery, PriceQueryValidationError};
pub use self::review::{
    Rating, Review, ReviewDraft, ReviewId, ReviewValidationError, ReviewWithAuthor,
};
pub use self::review_service::ReviewService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, Location, MobileNumber, User, UserId, UserProfile, UserValidationError,
    Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use rentease::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
