//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod listings;
pub mod notifications;
pub mod reviews;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`, with extractor failures
/// reported in the shared error shape.
///
/// Literal listing paths are registered before `/listings/{id}` so they are
/// not captured as identifiers.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::signup)
        .service(users::login)
        .service(users::logout)
        .service(users::logout_via_get)
        .service(users::current_user)
        .service(listings::search_listings)
        .service(listings::predict_price)
        .service(listings::listings_by_category)
        .service(listings::list_listings)
        .service(listings::create_listing)
        .service(listings::show_listing)
        .service(listings::update_listing)
        .service(listings::delete_listing)
        .service(reviews::create_review)
        .service(reviews::delete_review)
        .service(notifications::register_interest)
        .service(notifications::list_notifications)
        .service(notifications::delete_notification);
}
