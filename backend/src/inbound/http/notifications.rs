//! Interested-buyer handlers: register interest and manage the inbox.
//!
//! ```text
//! POST   /api/v1/listings/{id}/interest
//! GET    /api/v1/notifications
//! DELETE /api/v1/notifications/{notificationId}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{DeleteOutcome, InterestOutcome};
use crate::domain::{Error, Notification, NotificationId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_listing_id, parse_notification_id};

/// Confirmation after the owner has been notified.
pub const INTEREST_REGISTERED_MESSAGE: &str = "The owner has been notified of your interest";
/// Rejection when the user already expressed interest in the listing.
pub const ALREADY_INTERESTED_MESSAGE: &str = "You have already shown interest in this listing";
/// Rejection when the user owns the listing.
pub const SELF_INTEREST_MESSAGE: &str = "You cannot show interest in your own listing";
/// Confirmation for `DELETE /notifications/{notificationId}`.
pub const NOTIFICATION_DELETED_MESSAGE: &str = "Notification deleted";

/// Confirmation after registering interest.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestRegistered {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier of the stored notification.
    #[schema(value_type = String, format = Uuid)]
    pub notification_id: NotificationId,
}

/// Tell a listing's owner that the signed-in user is interested.
#[utoipa::path(
    post,
    path = "/api/v1/listings/{id}/interest",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Owner notified", body = InterestRegistered),
        (status = 400, description = "Own listing", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 404, description = "Listing not found", body = ErrorSchema),
        (status = 409, description = "Interest already registered", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "registerInterest"
)]
#[post("/listings/{id}/interest")]
pub async fn register_interest(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<InterestRegistered>> {
    let interested = session.require_user_id()?;
    let listing = parse_listing_id(&path)?;
    match state.interest.register_interest(&listing, &interested).await? {
        InterestOutcome::Registered(notification) => Ok(web::Json(InterestRegistered {
            message: INTEREST_REGISTERED_MESSAGE.to_owned(),
            notification_id: notification.id,
        })),
        InterestOutcome::AlreadyRegistered => Err(Error::conflict(ALREADY_INTERESTED_MESSAGE)),
        InterestOutcome::SelfInterestRejected => {
            Err(Error::invalid_request(SELF_INTEREST_MESSAGE))
        }
    }
}

/// The signed-in user's inbox, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Notifications", body = [Notification]),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "listNotifications"
)]
#[get("/notifications")]
pub async fn list_notifications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Notification>>> {
    let user = session.require_user_id()?;
    Ok(web::Json(state.inbox.list_notifications(&user).await?))
}

/// Remove one notification from the signed-in user's inbox.
///
/// Deleting an entry that is already gone also answers 200.
#[utoipa::path(
    delete,
    path = "/api/v1/notifications/{notificationId}",
    params(("notificationId" = String, Path, description = "Notification identifier")),
    responses(
        (status = 200, description = "Notification removed or already absent"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Not signed in", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "deleteNotification"
)]
#[delete("/notifications/{notification_id}")]
pub async fn delete_notification(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user_id()?;
    let id = parse_notification_id(&path)?;
    let outcome = state.inbox.delete_notification(&user, &id).await?;
    if outcome == DeleteOutcome::AlreadyAbsent {
        debug!(notification_id = %id, "notification already absent");
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": NOTIFICATION_DELETED_MESSAGE })))
}
