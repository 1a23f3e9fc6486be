//! Handler tests for the listing endpoints.

use super::*;
use crate::domain::ports::{MockListingsCommand, MockListingsQuery, MockPriceEstimateQuery};
use crate::domain::test_fixtures::{listing_owned_by, user_named};
use crate::domain::{PERMISSION_DENIED_MESSAGE, UserId};
use crate::inbound::http::test_utils::{signed_in_cookie, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

#[fixture]
fn villa_request() -> ListingRequest {
    ListingRequest {
        title: "Sea View Villa".to_owned(),
        description: "Wake up to the Arabian Sea".to_owned(),
        price: 5400,
        location: "Calangute".to_owned(),
        country: "India".to_owned(),
        category: vec!["Amazing Pools".to_owned(), "Trending".to_owned()],
        image: None,
    }
}

#[rstest]
#[actix_web::test]
async fn index_returns_listings_as_camel_case_json() {
    let listing = listing_owned_by(&UserId::random(), "Sea View Villa");
    let mut query = MockListingsQuery::new();
    query
        .expect_list_listings()
        .return_once(move || Ok(vec![listing]));
    let mut state = HttpState::unconfigured();
    state.listings = Arc::new(query);
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/listings").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body[0]["title"], "Sea View Villa");
    assert!(body[0].get("createdAt").is_some());
}

#[rstest]
#[case("iconic-cities", Category::IconicCities)]
#[case("Mountains", Category::Mountains)]
#[actix_web::test]
async fn category_route_parses_label(#[case] raw: &str, #[case] expected: Category) {
    let mut query = MockListingsQuery::new();
    query
        .expect_listings_by_category()
        .withf(move |category| *category == expected)
        .return_once(|_| Ok(Vec::new()));
    let mut state = HttpState::unconfigured();
    state.listings = Arc::new(query);
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/listings/categories/{raw}"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn unknown_category_is_bad_request() {
    let app = actix_test::init_service(test_app(HttpState::unconfigured())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/listings/categories/Caves")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "unknown_category");
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({ "destination": "   " }), "empty_destination")]
#[actix_web::test]
async fn search_requires_destination(#[case] body: Value, #[case] code: &str) {
    let app = actix_test::init_service(test_app(HttpState::unconfigured())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/search")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "destination");
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn search_with_no_match_is_empty_array() {
    let mut query = MockListingsQuery::new();
    query
        .expect_search_listings()
        .withf(|term| term.as_str() == "atlantis")
        .return_once(|_| Ok(Vec::new()));
    let mut state = HttpState::unconfigured();
    state.listings = Arc::new(query);
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/search")
            .set_json(json!({ "destination": "Atlantis" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn show_with_malformed_id_is_bad_request() {
    let app = actix_test::init_service(test_app(HttpState::unconfigured())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/listings/not-a-uuid")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "listingId");
}

#[rstest]
#[actix_web::test]
async fn show_embeds_owner_profile() {
    let ada = user_named("ada_l");
    let listing = listing_owned_by(ada.id(), "Sea View Villa");
    let id = listing.id;
    let mut query = MockListingsQuery::new();
    query.expect_show_listing().return_once(move |_| {
        Ok(ListingDetail {
            listing,
            owner_profile: Some(ada),
            reviews: Vec::new(),
        })
    });
    let mut state = HttpState::unconfigured();
    state.listings = Arc::new(query);
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/listings/{id}"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["title"], "Sea View Villa");
    assert_eq!(body["ownerProfile"]["username"], "ada_l");
    assert_eq!(body["reviews"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn create_requires_session(villa_request: ListingRequest) {
    let mut command = MockListingsCommand::new();
    command.expect_create_listing().never();
    let mut state = HttpState::unconfigured();
    state.listings_command = Arc::new(command);
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings")
            .set_json(villa_request)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn create_returns_message_and_listing(villa_request: ListingRequest) {
    let owner = UserId::random();
    let created = listing_owned_by(&owner, "Sea View Villa");
    let owner_for_mock = owner.clone();
    let mut command = MockListingsCommand::new();
    command
        .expect_create_listing()
        .withf(move |actor, draft| {
            *actor == owner_for_mock
                && draft.categories == vec![Category::AmazingPools, Category::Trending]
        })
        .return_once(move |_, _| Ok(created));
    let mut state = HttpState::unconfigured();
    state.listings_command = Arc::new(command);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = signed_in_cookie(&app, &owner).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings")
            .cookie(cookie)
            .set_json(villa_request)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: ListingMessage = actix_test::read_body_json(res).await;
    assert_eq!(body.message, LISTING_CREATED_MESSAGE);
    assert_eq!(body.listing.owner, owner);
}

#[rstest]
#[actix_web::test]
async fn create_with_zero_price_is_rejected(mut villa_request: ListingRequest) {
    villa_request.price = 0;
    let app = actix_test::init_service(test_app(HttpState::unconfigured())).await;
    let cookie = signed_in_cookie(&app, &UserId::random()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings")
            .cookie(cookie)
            .set_json(villa_request)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "price");
}

#[rstest]
#[actix_web::test]
async fn update_by_stranger_is_forbidden(villa_request: ListingRequest) {
    let mut command = MockListingsCommand::new();
    command
        .expect_update_listing()
        .return_once(|_, _, _| Err(Error::forbidden(PERMISSION_DENIED_MESSAGE)));
    let mut state = HttpState::unconfigured();
    state.listings_command = Arc::new(command);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = signed_in_cookie(&app, &UserId::random()).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/listings/{}", ListingId::random()))
            .cookie(cookie)
            .set_json(villa_request)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], PERMISSION_DENIED_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn update_returns_revised_listing(villa_request: ListingRequest) {
    let owner = UserId::random();
    let revised = listing_owned_by(&owner, "Sea View Villa");
    let id = revised.id;
    let mut command = MockListingsCommand::new();
    command
        .expect_update_listing()
        .withf(move |_, listing, _| *listing == id)
        .return_once(move |_, _, _| Ok(revised));
    let mut state = HttpState::unconfigured();
    state.listings_command = Arc::new(command);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = signed_in_cookie(&app, &owner).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/listings/{id}"))
            .cookie(cookie)
            .set_json(villa_request)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: ListingMessage = actix_test::read_body_json(res).await;
    assert_eq!(body.message, LISTING_UPDATED_MESSAGE);
    assert_eq!(body.listing.id, id);
}

#[rstest]
#[actix_web::test]
async fn delete_returns_listing_id() {
    let owner = UserId::random();
    let id = ListingId::random();
    let mut command = MockListingsCommand::new();
    command
        .expect_delete_listing()
        .times(1)
        .return_once(|_, _| Ok(()));
    let mut state = HttpState::unconfigured();
    state.listings_command = Arc::new(command);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = signed_in_cookie(&app, &owner).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/listings/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: ListingDeleted = actix_test::read_body_json(res).await;
    assert_eq!(body.message, LISTING_DELETED_MESSAGE);
    assert_eq!(body.listing_id, id);
}

#[rstest]
#[actix_web::test]
async fn predict_price_forwards_query() {
    let mut prices = MockPriceEstimateQuery::new();
    prices
        .expect_predict_price()
        .withf(|query| query.location() == "Goa" && query.country() == Some("India"))
        .return_once(|_| {
            Ok(PredictedPrice {
                predicted_price: 4200.0,
            })
        });
    let mut state = HttpState::unconfigured();
    state.prices = Arc::new(prices);
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/predict-price")
            .set_json(json!({ "location": "Goa", "country": "India" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["predictedPrice"], json!(4200.0));
}

#[rstest]
#[actix_web::test]
async fn predict_price_without_location_is_bad_request() {
    let app = actix_test::init_service(test_app(HttpState::unconfigured())).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/predict-price")
            .set_json(json!({ "country": "India" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn pricing_outage_is_service_unavailable() {
    let mut prices = MockPriceEstimateQuery::new();
    prices
        .expect_predict_price()
        .return_once(|_| Err(Error::service_unavailable("pricing service down")));
    let mut state = HttpState::unconfigured();
    state.prices = Arc::new(prices);
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/listings/predict-price")
            .set_json(json!({ "location": "Goa" }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
