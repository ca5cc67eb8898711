mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

#[actix_rt::test]
async fn root_endpoint_no_auth() {
    let Some((app, _fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Server up!");
}

#[actix_rt::test]
async fn health_endpoint_no_auth() {
    let Some((app, _fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "OK");
}

#[actix_rt::test]
async fn menu_lists_only_available_dishes_without_auth() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::get().uri("/menu").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    let items = body["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["dishId"], fixtures.available_dish_id.as_str());
    assert_eq!(items[0]["name"], "Masala Dosa");
    assert_eq!(
        items[0]["availabilityHistory"]
            .as_array()
            .expect("history")
            .len(),
        1
    );
}

#[actix_rt::test]
async fn dish_votes_is_public() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::get().uri("/dish-votes").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    let dosa = &body["votes"][fixtures.available_dish_id.as_str()];
    assert_eq!(dosa["dishName"], "Masala Dosa");
    assert_eq!(dosa["likes"], 0);
    assert!(dosa["currentComments"].as_array().expect("comments").is_empty());
}

#[actix_rt::test]
async fn openapi_document_lists_routes() {
    let Some((app, _fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::get()
        .uri("/api-docs/openapi.json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let paths = body["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/vote"));
    assert!(paths.contains_key("/orders/{id}/status"));
    assert!(paths.contains_key("/mess/leaderboard"));
}
