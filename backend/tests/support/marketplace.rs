//! HTTP harness over the in-memory store.
//!
//! Builds the full `/api/v1` surface with real password hashing and a fixed
//! price estimate, and drives it through cookie-carrying requests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use async_trait::async_trait;
use mockable::DefaultClock;
use rentease::Trace;
use rentease::domain::ports::{PricePredictionError, PricePredictor};
use rentease::domain::{PredictedPrice, PriceQuery, TRACE_ID_HEADER};
use rentease::inbound::http::configure_api;
use rentease::inbound::http::state::{HttpState, HttpStateAdapters};
use rentease::outbound::memory::InMemoryStore;
use rentease::outbound::password::Argon2PasswordHasher;
use serde_json::{Value, json};

/// Estimate returned by [`FixedPredictor`].
pub const FIXED_ESTIMATE: f64 = 4250.5;

/// Price predictor answering every query with [`FIXED_ESTIMATE`].
pub struct FixedPredictor;

#[async_trait]
impl PricePredictor for FixedPredictor {
    async fn predict(&self, _query: &PriceQuery) -> Result<PredictedPrice, PricePredictionError> {
        Ok(PredictedPrice {
            predicted_price: FIXED_ESTIMATE,
        })
    }
}

/// Wire every service over one shared in-memory store.
pub fn memory_state(store: &InMemoryStore) -> HttpState {
    let shared = Arc::new(store.clone());
    HttpState::from_adapters(HttpStateAdapters {
        users: Arc::clone(&shared),
        listings: Arc::clone(&shared),
        reviews: Arc::clone(&shared),
        notifications: shared,
        hasher: Arc::new(Argon2PasswordHasher::new()),
        predictor: Arc::new(FixedPredictor),
        clock: Arc::new(DefaultClock),
    })
}

/// The API as the server mounts it, minus health probes and docs.
pub fn marketplace_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(state))
        .wrap(session)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Status, JSON body (or `Null`), and any refreshed session cookie.
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
    pub cookie: Option<Cookie<'static>>,
    pub trace_id: Option<String>,
}

impl Reply {
    /// The `code` field of an error envelope.
    pub fn error_code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}

/// Send `req`, attaching `cookie` when present.
pub async fn send<S>(app: &S, req: test::TestRequest, cookie: Option<&Cookie<'static>>) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = match cookie {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    };
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned);
    let bytes = test::read_body(res).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        body,
        cookie,
        trace_id,
    }
}

/// Create an account and return its id and session cookie.
pub async fn sign_up<S>(app: &S, username: &str, location: &str) -> (String, Cookie<'static>)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = send(
        app,
        test::TestRequest::post()
            .uri("/api/v1/signup")
            .set_json(json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "correct-horse",
                "mobile": "+91 98765 43210",
                "location": location,
            })),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "signup body: {}", reply.body);
    let id = reply.body["id"]
        .as_str()
        .expect("user id in signup reply")
        .to_owned();
    (id, reply.cookie.expect("signup sets the session cookie"))
}

/// Listing payload with the given title, location and categories.
pub fn listing_body(title: &str, location: &str, categories: &[&str]) -> Value {
    json!({
        "title": title,
        "description": "Whitewashed rooms a short walk from the sand",
        "price": 5100,
        "location": location,
        "country": "India",
        "category": categories,
    })
}

/// Publish a listing as the cookie's owner and return its id.
pub async fn publish<S>(app: &S, owner: &Cookie<'static>, body: Value) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let reply = send(
        app,
        test::TestRequest::post().uri("/api/v1/listings").set_json(body),
        Some(owner),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "create body: {}", reply.body);
    reply.body["listing"]["id"]
        .as_str()
        .expect("listing id in create reply")
        .to_owned()
}

/// Register the cookie's user as interested in `listing`.
pub async fn register_interest<S>(app: &S, listing: &str, buyer: &Cookie<'static>) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let uri = format!("/api/v1/listings/{listing}/interest");
    send(app, test::TestRequest::post().uri(&uri), Some(buyer)).await
}

/// Read the cookie's notification inbox.
pub async fn read_inbox<S>(app: &S, owner: &Cookie<'static>) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::get().uri("/api/v1/notifications");
    send(app, req, Some(owner)).await
}
