//! Account handlers: signup, login, logout, and the current user.
//!
//! ```text
//! POST /api/v1/signup {"username":"ada_l","email":"ada@example.com",...}
//! POST /api/v1/login {"username":"ada_l","password":"correct horse"}
//! POST /api/v1/logout
//! GET /api/v1/logout
//! GET /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, SignupDetails, SignupFields, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_credentials_validation_error;

/// Message returned by `/api/v1/logout`.
pub const LOGGED_OUT_MESSAGE: &str = "Successfully logged out";

/// Signup request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Unique handle, 3 to 32 characters.
    pub username: String,
    /// Contact address shown to listing owners.
    pub email: String,
    /// Plain-text password; only its hash is stored.
    pub password: String,
    /// Contact number shown to listing owners.
    pub mobile: String,
    /// Home town or city.
    pub location: String,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account handle.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Create an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Username taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let SignupRequest {
        username,
        email,
        password,
        mobile,
        location,
    } = payload.into_inner();
    let details = SignupDetails::try_from_fields(SignupFields {
        username: &username,
        email: &email,
        password: &password,
        mobile: &mobile,
        location: &location,
    })
    .map_err(|err| map_credentials_validation_error(&err))?;

    let user = state.accounts.signup(&details).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(user))
}

/// Verify credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(|err| map_credentials_validation_error(&err))?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(user))
}

/// Drop the session. Succeeds whether or not anyone was signed in.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    end_session(&session)
}

/// Link-friendly alias of [`logout`] for clients that sign out with a GET.
#[utoipa::path(
    get,
    path = "/api/v1/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logoutViaGet",
    security([])
)]
#[get("/logout")]
pub async fn logout_via_get(session: SessionContext) -> HttpResponse {
    end_session(&session)
}

fn end_session(session: &SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(json!({ "message": LOGGED_OUT_MESSAGE }))
}

/// Profile of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not signed in", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.users.current_user(&user_id).await?;
    Ok(web::Json(user))
}
