//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! request and response DTOs, and the session cookie security scheme. The
//! document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump`.

use crate::domain::{
    Category, ImageRef, Listing, ListingDetail, Notification, PredictedPrice, Review,
    ReviewWithAuthor, User,
};
use crate::inbound::http::listings::{
    ImageRequest, ListingDeleted, ListingMessage, ListingRequest, PricePredictionRequest,
    SearchRequest,
};
use crate::inbound::http::notifications::InterestRegistered;
use crate::inbound::http::reviews::ReviewRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{LoginRequest, SignupRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/signup or /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "RentEase API",
        description = "Rental listings, reviews, and interested-buyer notifications.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::logout_via_get,
        crate::inbound::http::users::current_user,
        crate::inbound::http::listings::list_listings,
        crate::inbound::http::listings::listings_by_category,
        crate::inbound::http::listings::search_listings,
        crate::inbound::http::listings::show_listing,
        crate::inbound::http::listings::create_listing,
        crate::inbound::http::listings::update_listing,
        crate::inbound::http::listings::delete_listing,
        crate::inbound::http::listings::predict_price,
        crate::inbound::http::reviews::create_review,
        crate::inbound::http::reviews::delete_review,
        crate::inbound::http::notifications::register_interest,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::delete_notification,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Listing,
        ListingDetail,
        Category,
        ImageRef,
        Review,
        ReviewWithAuthor,
        Notification,
        PredictedPrice,
        SignupRequest,
        LoginRequest,
        ListingRequest,
        ImageRequest,
        SearchRequest,
        PricePredictionRequest,
        ListingMessage,
        ListingDeleted,
        ReviewRequest,
        InterestRegistered,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "users", description = "Accounts and sessions"),
        (name = "listings", description = "Rental listings and price estimates"),
        (name = "reviews", description = "Listing reviews"),
        (name = "notifications", description = "Interested-buyer inbox"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
