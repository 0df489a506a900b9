// SPDX-License-Identifier: MIT

//! Interaction toggle API tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

mod common;

async fn post_interact(app: &Router, cookie: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/interact")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get_interactions(app: &Router, cookie: &str, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_toggle_added_then_removed() {
    let (app, state) = common::create_test_app().await;
    let (_user, cookie) = common::login_test_user(&state, "toggle@example.com").await;

    let body = r#"{"image_url":"http://x/1.png","type":"like"}"#;

    let (status, json) = post_interact(&app, &cookie, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "added");
    assert_eq!(json["interaction_type"], "like");

    let (status, json) = post_interact(&app, &cookie, body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "removed");
    assert_eq!(json["interaction_type"], "like");

    let listed = get_interactions(&app, &cookie, "/api/user/interactions").await;
    assert_eq!(listed["interactions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_image_url_is_bad_request() {
    let (app, state) = common::create_test_app().await;
    let (user, cookie) = common::login_test_user(&state, "toggle@example.com").await;

    let (status, json) = post_interact(&app, &cookie, r#"{"type":"like"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");

    // Empty string counts as missing, matching the falsy-field contract
    let (status, _) = post_interact(&app, &cookie, r#"{"image_url":"","type":"like"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No record was created by either request
    let rows = state.db.interactions_for_user(user.id, None).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_missing_type_is_bad_request() {
    let (app, state) = common::create_test_app().await;
    let (user, cookie) = common::login_test_user(&state, "toggle@example.com").await;

    let (status, _) = post_interact(&app, &cookie, r#"{"image_url":"http://x/1.png"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let rows = state.db.interactions_for_user(user.id, None).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_unknown_type_is_bad_request() {
    let (app, state) = common::create_test_app().await;
    let (_user, cookie) = common::login_test_user(&state, "toggle@example.com").await;

    let (status, json) =
        post_interact(&app, &cookie, r#"{"image_url":"http://x/1.png","type":"repost"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_like_scenario_with_title() {
    let (app, state) = common::create_test_app().await;
    let (_user, cookie) = common::login_test_user(&state, "cat@example.com").await;

    let body = r#"{"image_url":"http://x/1.png","image_title":"Cat","type":"like"}"#;

    let (status, _) = post_interact(&app, &cookie, body).await;
    assert_eq!(status, StatusCode::OK);

    let listed = get_interactions(&app, &cookie, "/api/user/interactions").await;
    let interactions = listed["interactions"].as_array().unwrap();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0]["interaction_type"], "like");
    assert_eq!(interactions[0]["image_title"], "Cat");

    // Liking again removes the interaction entirely
    let (_, json) = post_interact(&app, &cookie, body).await;
    assert_eq!(json["status"], "removed");

    let listed = get_interactions(&app, &cookie, "/api/user/interactions").await;
    assert_eq!(listed["interactions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_removed_comment_content_is_discarded() {
    let (app, state) = common::create_test_app().await;
    let (_user, cookie) = common::login_test_user(&state, "commenter@example.com").await;

    let first = r#"{"image_url":"http://x/1.png","type":"comment","content":"first thoughts"}"#;
    let second = r#"{"image_url":"http://x/1.png","type":"comment","content":"second thoughts"}"#;

    let (_, json) = post_interact(&app, &cookie, first).await;
    assert_eq!(json["status"], "added");

    // Toggle off: the original content is gone, not edited
    let (_, json) = post_interact(&app, &cookie, second).await;
    assert_eq!(json["status"], "removed");

    let (_, json) = post_interact(&app, &cookie, second).await;
    assert_eq!(json["status"], "added");

    let listed = get_interactions(&app, &cookie, "/api/user/interactions?type=comment").await;
    let interactions = listed["interactions"].as_array().unwrap();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0]["content"], "second thoughts");
}

#[tokio::test]
async fn test_interactions_are_scoped_per_user() {
    let (app, state) = common::create_test_app().await;
    let (_a, cookie_a) = common::login_test_user(&state, "a@example.com").await;
    let (_b, cookie_b) = common::login_test_user(&state, "b@example.com").await;

    let body = r#"{"image_url":"http://x/1.png","type":"like"}"#;
    let (_, json) = post_interact(&app, &cookie_a, body).await;
    assert_eq!(json["status"], "added");

    // The same toggle from another user adds rather than removes
    let (_, json) = post_interact(&app, &cookie_b, body).await;
    assert_eq!(json["status"], "added");

    let listed = get_interactions(&app, &cookie_b, "/api/user/interactions").await;
    assert_eq!(listed["interactions"].as_array().unwrap().len(), 1);
}
