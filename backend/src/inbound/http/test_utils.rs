//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::{Error, UserId};
use crate::inbound::http::configure_api;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const SIGN_IN_PATH: &str = "/__test/sign-in";

/// Build a session middleware configured for tests.
///
/// Fresh key per invocation, cookie named `session`, `Secure` disabled so
/// plain-HTTP test requests carry it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

async fn sign_in(session: SessionContext, path: web::Path<String>) -> Result<HttpResponse, Error> {
    let user = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user)?;
    Ok(HttpResponse::NoContent().finish())
}

/// The full `/api/v1` surface over `state`, plus a sign-in shortcut.
pub fn test_app(
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
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .route(&format!("{SIGN_IN_PATH}/{{id}}"), web::post().to(sign_in))
        .service(web::scope("/api/v1").configure(configure_api))
}

/// Request that signs `user` in on an app built by [`test_app`].
pub fn sign_in_request(user: &UserId) -> test::TestRequest {
    test::TestRequest::post().uri(&format!("{SIGN_IN_PATH}/{user}"))
}

/// Sign `user` in on an app built by [`test_app`] and return the cookie.
pub async fn signed_in_cookie<S>(app: &S, user: &UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, sign_in_request(user).to_request()).await;
    session_cookie(&res).expect("sign-in sets the session cookie")
}

/// The `session` cookie set by `res`, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}
