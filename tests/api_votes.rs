mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::auth_header;
use serde_json::{json, Value};

#[actix_rt::test]
async fn vote_toggle_round_trip() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };
    let uri = format!("/vote?as=user-{}", fixtures.user_id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(auth_header())
        .set_json(json!({ "dishId": "Masala Dosa", "vote": "like" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["likes"], 1);
    assert_eq!(body["userVote"], "like");

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(auth_header())
        .set_json(json!({ "dishId": "masala-dosa", "vote": "like" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["likes"], 0);
    assert_eq!(body["dislikes"], 0);
    assert!(body["userVote"].is_null());
}

#[actix_rt::test]
async fn vote_on_unavailable_dish_is_bad_request() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri(&format!("/vote?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "dishId": fixtures.unavailable_dish_id, "vote": "dislike" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("Cold Coffee"));
}

#[actix_rt::test]
async fn vote_on_unknown_dish_is_not_found() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri(&format!("/vote?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "dishId": "filter-coffee", "vote": "like" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn admin_cannot_vote() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri("/vote?as=admin-cafe-admin")
        .insert_header(auth_header())
        .set_json(json!({ "dishId": fixtures.available_dish_id, "vote": "like" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn feedback_shows_up_in_dish_votes() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri(&format!("/feedback?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "dishId": fixtures.available_dish_id, "comment": "  Needs more sambar " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/dish-votes").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let comments = body["votes"][fixtures.available_dish_id.as_str()]["currentComments"]
        .as_array()
        .expect("comments")
        .clone();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["comment"], "Needs more sambar");
    assert_eq!(comments[0]["userName"], "User One");
}

#[actix_rt::test]
async fn blank_feedback_is_rejected() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri(&format!("/feedback?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "dishId": fixtures.available_dish_id, "comment": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn user_votes_are_private() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri(&format!("/vote?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "dishId": fixtures.available_dish_id, "vote": "dislike" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!(
            "/user-votes/{}?as=user-{}",
            fixtures.user_id, fixtures.user_id
        ))
        .insert_header(auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let entry = &body["votes"][fixtures.available_dish_id.as_str()];
    assert_eq!(entry["type"], "dislike");
    assert_eq!(entry["isCurrent"], true);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/user-votes/{}?as=user-{}",
            fixtures.user_id, fixtures.other_user_id
        ))
        .insert_header(auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/user-votes/{}?as=admin-cafe-admin", fixtures.user_id))
        .insert_header(auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn dish_name_stands_in_for_missing_id() {
    let Some((app, fixtures, _db)) = common::setup_api_app().await else {
        return;
    };

    let req = test::TestRequest::post()
        .uri(&format!("/vote?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "dishName": "Masala Dosa", "vote": "dislike" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dislikes"], 1);

    let req = test::TestRequest::post()
        .uri(&format!("/feedback?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "dishId": "", "dishName": "Masala Dosa", "comment": "Soggy today" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/dish-votes").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let dosa = &body["votes"][fixtures.available_dish_id.as_str()];
    assert_eq!(dosa["dislikes"], 1);
    assert_eq!(dosa["currentComments"][0]["comment"], "Soggy today");

    let req = test::TestRequest::post()
        .uri(&format!("/vote?as=user-{}", fixtures.user_id))
        .insert_header(auth_header())
        .set_json(json!({ "vote": "like" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
