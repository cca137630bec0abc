// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor search and ranking over HTTP.

use axum::http::StatusCode;
use mentorhub::models::Role;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

fn headlines(body: &Value) -> Vec<String> {
    body["mentors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["headline"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_search_ranks_by_matching_skills() {
    let (app, state) = common::create_test_app();
    common::seed_mentor(&state, "generalist", 30.0, 5.0, &["Go"]);
    common::seed_mentor(&state, "rustacean", 60.0, 4.0, &["Rust", "WebAssembly"]);
    common::seed_mentor(&state, "systems", 50.0, 4.5, &["Rust"]);
    let student = common::seed_user(&state, "student", Some(Role::Student));
    let token = common::token_for(&state, &student);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/search/mentors",
            Some(&token),
            Some(json!({ "technologies": ["rust", "webassembly"] })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(
        headlines(&body),
        vec!["rustacean mentors", "systems mentors"]
    );
    assert_eq!(
        body["mentors"][0]["matchingSkills"],
        json!(["Rust", "WebAssembly"])
    );
}

#[tokio::test]
async fn test_search_filters_rate_and_rating() {
    let (app, state) = common::create_test_app();
    common::seed_mentor(&state, "cheap", 20.0, 3.0, &["Rust"]);
    common::seed_mentor(&state, "pricey", 200.0, 5.0, &["Rust"]);
    common::seed_mentor(&state, "balanced", 60.0, 4.5, &["Rust"]);
    let student = common::seed_user(&state, "student", Some(Role::Student));
    let token = common::token_for(&state, &student);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/search/mentors",
            Some(&token),
            Some(json!({ "minRating": 4.0, "maxHourlyRate": 100.0 })),
        ))
        .await
        .unwrap();

    let body = common::body_json(response).await;
    assert_eq!(headlines(&body), vec!["balanced mentors"]);
}

#[tokio::test]
async fn test_search_excludes_caller() {
    let (app, state) = common::create_test_app();
    let (me, _) = common::seed_mentor(&state, "me", 20.0, 5.0, &["Rust"]);
    common::seed_mentor(&state, "other", 20.0, 4.0, &["Rust"]);
    let token = common::token_for(&state, &me);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/search/mentors",
            Some(&token),
            Some(json!({ "userId": me.id })),
        ))
        .await
        .unwrap();

    let body = common::body_json(response).await;
    assert_eq!(headlines(&body), vec!["other mentors"]);
}

#[tokio::test]
async fn test_search_rejects_invalid_rating() {
    let (app, state) = common::create_test_app();
    let student = common::seed_user(&state, "student", Some(Role::Student));
    let token = common::token_for(&state, &student);

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/search/mentors",
            Some(&token),
            Some(json!({ "minRating": 9.0 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_top_mentors_by_technology() {
    let (app, state) = common::create_test_app();
    common::seed_mentor(&state, "a", 20.0, 4.0, &["Rust"]);
    common::seed_mentor(&state, "b", 20.0, 4.9, &["Rust"]);
    common::seed_mentor(&state, "c", 20.0, 5.0, &["Python"]);
    let student = common::seed_user(&state, "student", Some(Role::Student));
    let token = common::token_for(&state, &student);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "GET",
            "/api/search/top-mentors?technology=Rust&limit=10",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(headlines(&body), vec!["b mentors", "a mentors"]);

    let response = app
        .oneshot(common::json_request(
            "GET",
            "/api/search/top-mentors?limit=1",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(headlines(&body), vec!["c mentors"]);
}
