// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid tokens
//! 2. Tokens are accepted from the Authorization header or the cookie
//! 3. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use mentorhub::config::Config;
use mentorhub::models::Role;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request("GET", "/api/me", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::body_json(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "Not authenticated");
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "GET",
            "/api/me",
            Some("invalid.token.here"),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_user_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("ghost", &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::json_request("GET", "/api/me", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_bearer_token() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "octocat", Some(Role::Student));
    let token = common::token_for(&state, &user);

    let response = app
        .oneshot(common::json_request("GET", "/api/me", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["user"]["username"], "octocat");
    assert_eq!(body["user"]["role"], "student");
}

#[tokio::test]
async fn test_protected_route_with_cookie_token() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "octocat", None);
    let token = common::token_for(&state, &user);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::COOKIE, format!("theme=dark; token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["user"]["role"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_role_set_once() {
    let (app, state) = common::create_test_app();
    let user = common::seed_user(&state, "octocat", None);
    let token = common::token_for(&state, &user);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/user/role",
            Some(&token),
            Some(serde_json::json!({ "role": "mentor" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["user"]["role"], "mentor");

    // Same role again is accepted
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/user/role",
            Some(&token),
            Some(serde_json::json!({ "role": "mentor" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/user/role",
            Some(&token),
            Some(serde_json::json!({ "role": "student" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/user/role",
            Some(&token),
            Some(serde_json::json!({ "role": "admin" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cannot_edit_another_users_profile() {
    let (app, state) = common::create_test_app();
    let alice = common::seed_user(&state, "alice", Some(Role::Student));
    let bob = common::seed_user(&state, "bob", Some(Role::Student));
    let token = common::token_for(&state, &alice);

    let response = app
        .oneshot(common::json_request(
            "PATCH",
            &format!("/api/profile/user/{}", bob.id),
            Some(&token),
            Some(serde_json::json!({ "displayName": "Not Bob" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(state.db.get_user(&bob.id).unwrap().display_name.is_none());
}

#[tokio::test]
async fn test_cors_preflight_any_origin() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/me")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_cors_allow_list_with_credentials() {
    let mut config = Config::test_default();
    config.cors_allowed_origins = vec!["https://app.example.com".to_string()];
    let (app, _) = common::create_test_app_with(config);

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/me")
                .header(header::ORIGIN, "https://app.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://app.example.com"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .unwrap(),
        "nosniff"
    );
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}
