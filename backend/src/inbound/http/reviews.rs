//! Review handlers.
//!
//! ```text
//! POST   /api/v1/listings/{id}/reviews {"rating":5,"comment":"Lovely"}
//! DELETE /api/v1/listings/{id}/reviews/{reviewId}
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{ReviewDraft, ReviewWithAuthor};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    map_review_validation_error, parse_listing_id, parse_review_id,
};

/// Confirmation for `DELETE /listings/{id}/reviews/{reviewId}`.
pub const REVIEW_DELETED_MESSAGE: &str = "Review deleted successfully";

/// Body for `POST /listings/{id}/reviews`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ReviewRequest {
    /// Whole stars from 1 to 5.
    pub rating: i64,
    /// Free-text review body.
    pub comment: String,
}

/// Review a listing as the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/listings/{id}/reviews",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = ReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewWithAuthor),
        (status = 400, description = "Invalid review", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Listing not found", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "createReview"
)]
#[post("/listings/{id}/reviews")]
pub async fn create_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewRequest>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let listing = parse_listing_id(&path)?;
    let draft = ReviewDraft::try_from_parts(payload.rating, &payload.comment)
        .map_err(|err| map_review_validation_error(&err))?;
    let review = state.reviews.create_review(&author, &listing, draft).await?;
    Ok(HttpResponse::Created().json(review))
}

/// Delete a review. Allowed for its author and the listing owner.
#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}/reviews/{reviewId}",
    params(
        ("id" = String, Path, description = "Listing identifier"),
        ("reviewId" = String, Path, description = "Review identifier")
    ),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 403, description = "Neither author nor listing owner", body = ErrorSchema),
        (status = 404, description = "Review not found on this listing", body = ErrorSchema)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/listings/{id}/reviews/{review_id}")]
pub async fn delete_review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let (listing, review) = path.into_inner();
    let listing = parse_listing_id(&listing)?;
    let review = parse_review_id(&review)?;
    state.reviews.delete_review(&actor, &listing, &review).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": REVIEW_DELETED_MESSAGE })))
}
