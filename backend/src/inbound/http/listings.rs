//! Listing handlers: browse, search, show, and owner-gated mutations.
//!
//! ```text
//! GET    /api/v1/listings
//! GET    /api/v1/listings/categories/{category}
//! POST   /api/v1/listings/search {"destination":"goa"}
//! GET    /api/v1/listings/{id}
//! POST   /api/v1/listings
//! PUT    /api/v1/listings/{id}
//! DELETE /api/v1/listings/{id}
//! POST   /api/v1/listings/predict-price {"location":"Goa","country":"India"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Category, Error, ImageRef, Listing, ListingDetail, ListingDraft, ListingFields, ListingId,
    PredictedPrice, PriceQuery, SearchTerm,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_listing_validation_error, map_price_query_validation_error,
    missing_field_error, parse_listing_id,
};

/// Confirmation for `POST /listings`.
pub const LISTING_CREATED_MESSAGE: &str = "New Listing Created!";
/// Confirmation for `PUT /listings/{id}`.
pub const LISTING_UPDATED_MESSAGE: &str = "Listing Updated!";
/// Confirmation for `DELETE /listings/{id}`.
pub const LISTING_DELETED_MESSAGE: &str = "Listing Deleted!";

/// Image already uploaded to storage.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    /// Public URL of the stored image.
    pub url: String,
    /// Defaults to the last URL segment when omitted.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Body for creating or replacing a listing.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    /// Display title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Nightly price in whole currency units.
    pub price: i64,
    /// Town or city.
    pub location: String,
    /// Country name.
    pub country: String,
    /// Category labels such as `"Trending"` or `"Amazing Pools"`.
    #[serde(default)]
    pub category: Vec<String>,
    /// Uploaded image; an update without one keeps the current image.
    #[serde(default)]
    pub image: Option<ImageRequest>,
}

impl ListingRequest {
    fn into_draft(self) -> Result<ListingDraft, Error> {
        let image = self
            .image
            .map(|image| ImageRef::new(image.url, image.filename.unwrap_or_default()))
            .transpose()
            .map_err(|err| map_listing_validation_error(&err))?;
        ListingDraft::try_from_fields(
            ListingFields {
                title: &self.title,
                description: &self.description,
                price: self.price,
                location: &self.location,
                country: &self.country,
                categories: &self.category,
            },
            image,
        )
        .map_err(|err| map_listing_validation_error(&err))
    }
}

/// Body for `POST /listings/search`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SearchRequest {
    /// Matched against title, location and country.
    pub destination: Option<String>,
}

/// Body for `POST /listings/predict-price`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PricePredictionRequest {
    /// Town or city; required.
    pub location: Option<String>,
    /// Country name.
    pub country: Option<String>,
}

/// Confirmation carrying the stored listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListingMessage {
    /// Human-readable confirmation.
    pub message: String,
    /// Listing as stored.
    pub listing: Listing,
}

/// Confirmation of a deletion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDeleted {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier of the removed listing.
    #[schema(value_type = String, format = Uuid)]
    pub listing_id: ListingId,
}

/// Every listing, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    responses(
        (status = 200, description = "All listings", body = [Listing]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "listListings",
    security([])
)]
#[get("/listings")]
pub async fn list_listings(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Listing>>> {
    Ok(web::Json(state.listings.list_listings().await?))
}

/// Listings tagged with a category.
#[utoipa::path(
    get,
    path = "/api/v1/listings/categories/{category}",
    params(("category" = String, Path, description = "Category label, e.g. `Mountains`")),
    responses(
        (status = 200, description = "Listings in the category", body = [Listing]),
        (status = 400, description = "Unknown category", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "listingsByCategory",
    security([])
)]
#[get("/listings/categories/{category}")]
pub async fn listings_by_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Listing>>> {
    let category: Category = path
        .parse()
        .map_err(|err| map_listing_validation_error(&err))?;
    Ok(web::Json(state.listings.listings_by_category(category).await?))
}

/// Case-insensitive search over title, location, and country.
#[utoipa::path(
    post,
    path = "/api/v1/listings/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching listings, possibly none", body = [Listing]),
        (status = 400, description = "Missing or blank destination", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "searchListings",
    security([])
)]
#[post("/listings/search")]
pub async fn search_listings(
    state: web::Data<HttpState>,
    payload: web::Json<SearchRequest>,
) -> ApiResult<web::Json<Vec<Listing>>> {
    let destination = payload
        .into_inner()
        .destination
        .ok_or_else(|| missing_field_error(FieldName::new("destination")))?;
    let term = SearchTerm::new(destination).map_err(|err| map_listing_validation_error(&err))?;
    Ok(web::Json(state.listings.search_listings(&term).await?))
}

/// A listing with its owner and reviews.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing detail", body = ListingDetail),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Listing not found", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "showListing",
    security([])
)]
#[get("/listings/{id}")]
pub async fn show_listing(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingDetail>> {
    let id = parse_listing_id(&path)?;
    Ok(web::Json(state.listings.show_listing(&id).await?))
}

/// Publish a listing owned by the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = ListingRequest,
    responses(
        (status = 201, description = "Listing created", body = ListingMessage),
        (status = 400, description = "Invalid listing", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "createListing"
)]
#[post("/listings")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ListingRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let draft = payload.into_inner().into_draft()?;
    let listing = state.listings_command.create_listing(&owner, draft).await?;
    Ok(HttpResponse::Created().json(ListingMessage {
        message: LISTING_CREATED_MESSAGE.to_owned(),
        listing,
    }))
}

/// Replace a listing's content. Owner only.
#[utoipa::path(
    put,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = ListingRequest,
    responses(
        (status = 200, description = "Listing updated", body = ListingMessage),
        (status = 400, description = "Invalid listing", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Listing not found", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "updateListing"
)]
#[put("/listings/{id}")]
pub async fn update_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ListingRequest>,
) -> ApiResult<web::Json<ListingMessage>> {
    let actor = session.require_user_id()?;
    let id = parse_listing_id(&path)?;
    let draft = payload.into_inner().into_draft()?;
    let listing = state
        .listings_command
        .update_listing(&actor, &id, draft)
        .await?;
    Ok(web::Json(ListingMessage {
        message: LISTING_UPDATED_MESSAGE.to_owned(),
        listing,
    }))
}

/// Remove a listing and its reviews. Owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing deleted", body = ListingDeleted),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Listing not found", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "deleteListing"
)]
#[delete("/listings/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingDeleted>> {
    let actor = session.require_user_id()?;
    let id = parse_listing_id(&path)?;
    state.listings_command.delete_listing(&actor, &id).await?;
    Ok(web::Json(ListingDeleted {
        message: LISTING_DELETED_MESSAGE.to_owned(),
        listing_id: id,
    }))
}

/// Suggested nightly price from the pricing service.
#[utoipa::path(
    post,
    path = "/api/v1/listings/predict-price",
    request_body = PricePredictionRequest,
    responses(
        (status = 200, description = "Predicted price", body = PredictedPrice),
        (
            status = 400,
            description = "Missing location or rejected by the model",
            body = ErrorSchema
        ),
        (status = 503, description = "Pricing service unavailable", body = ErrorSchema)
    ),
    tags = ["listings"],
    operation_id = "predictPrice",
    security([])
)]
#[post("/listings/predict-price")]
pub async fn predict_price(
    state: web::Data<HttpState>,
    payload: web::Json<PricePredictionRequest>,
) -> ApiResult<web::Json<PredictedPrice>> {
    let PricePredictionRequest { location, country } = payload.into_inner();
    let query = PriceQuery::new(location.as_deref().unwrap_or_default(), country.as_deref())
        .map_err(|err| map_price_query_validation_error(&err))?;
    Ok(web::Json(state.prices.predict_price(&query).await?))
}

#[cfg(test)]
mod tests;
