mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::auth_header;
use serde_json::{json, Value};

#[actix_rt::test]
async fn upsert_dishes_as_admin() {
    let Some((app, _fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri("/admin-dashboard?as=admin-cafe-admin")
        .insert_header(auth_header())
        .set_json(json!({ "items": [
            { "name": "Samosa", "price": 15.0, "veg": true, "available": false },
            { "name": "Masala Dosa", "price": 70.0, "veg": true, "available": true }
        ]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);
    // ordered by name
    assert_eq!(data[0]["dishId"], "masala-dosa");
    assert_eq!(data[0]["price"], 70.0);
    assert_eq!(data[1]["dishId"], "samosa");
    assert_eq!(data[1]["available"], false);
    let history = data[1]["availabilityHistory"].as_array().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["availableFrom"], history[0]["availableTo"]);
}

#[actix_rt::test]
async fn upsert_dishes_rejects_invalid_items() {
    let Some((app, _fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri("/admin-dashboard?as=admin-cafe-admin")
        .insert_header(auth_header())
        .set_json(json!({ "items": [
            { "name": "   ", "price": 15.0, "veg": true, "available": true }
        ]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
}

#[actix_rt::test]
async fn user_cannot_upsert_dishes() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri(&format!("/admin-dashboard?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "items": [
            { "name": "Samosa", "price": 15.0, "veg": true, "available": true }
        ]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn delete_dish_by_name_then_not_found() {
    let Some((app, _fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::delete()
        .uri("/admin-dashboard?as=admin-cafe-admin")
        .insert_header(auth_header())
        .set_json(json!({ "dishName": "Cold Coffee" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri("/admin-dashboard?as=admin-cafe-admin")
        .insert_header(auth_header())
        .set_json(json!({ "dishId": "cold-coffee" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/admin-dashboard?as=admin-cafe-admin")
        .insert_header(auth_header())
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn upsert_without_json_content_type_is_not_routed() {
    let Some((app, _fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri("/admin-dashboard?as=admin-cafe-admin")
        .insert_header(auth_header())
        .set_payload("items=samosa")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}
