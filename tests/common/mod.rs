// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mentorhub::config::Config;
use mentorhub::models::{MentorProfile, Role, SkillLevel, User};
use mentorhub::routes::create_router;
use mentorhub::AppState;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Create a test app backed by a fresh in-process store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Create a test JWT token for `user_id`, valid for a day.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
        iat: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 86400,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}

/// Insert a user directly into the store.
#[allow(dead_code)]
pub fn seed_user(state: &AppState, username: &str, role: Option<Role>) -> User {
    let user = User {
        id: format!("user-{}", username),
        username: username.to_string(),
        email: None,
        display_name: None,
        avatar_url: None,
        bio: None,
        role,
        github_data: None,
        created_at: "2025-01-01T00:00:00Z".to_string(),
    };
    state
        .db
        .get_or_insert_user_by_username(username, || user)
        .0
}

/// Insert a mentor user with a profile listing `skills`.
#[allow(dead_code)]
pub fn seed_mentor(
    state: &AppState,
    username: &str,
    hourly_rate: f64,
    rating: f64,
    skills: &[&str],
) -> (User, MentorProfile) {
    let user = seed_user(state, username, Some(Role::Mentor));
    let mut profile = MentorProfile::new(
        &user.id,
        format!("{} mentors", username),
        String::new(),
        hourly_rate,
    );
    profile.overall_rating = rating;
    for skill in skills {
        profile.upsert_skill(skill, SkillLevel::Advanced);
    }
    state.db.insert_mentor_profile(&profile).unwrap();
    (user, profile)
}

/// Token for a seeded user.
#[allow(dead_code)]
pub fn token_for(state: &AppState, user: &User) -> String {
    create_test_jwt(&user.id, &state.config.jwt_signing_key)
}

/// Build a request with an optional bearer token and JSON body.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve the app on an ephemeral local port. Returns the base URL.
#[allow(dead_code)]
pub async fn spawn_server(state: Arc<AppState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
