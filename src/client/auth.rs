// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side authentication context.

use super::{ApiClient, ClientError};
use crate::middleware::auth::TOKEN_COOKIE;
use crate::models::{Role, User};
use crate::routes::users::UserResponse;
use axum_extra::extract::cookie::Cookie;
use serde::Serialize;

/// Session token read once at start-up and handed to [`ApiClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    /// Read the `token` cookie out of a `Cookie:` header value.
    pub fn from_cookie_header(header: &str) -> Self {
        Cookie::split_parse(header)
            .filter_map(|cookie| cookie.ok())
            .find(|cookie| cookie.name() == TOKEN_COOKIE)
            .map(|cookie| Self::from_token(cookie.value_trimmed()))
            .unwrap_or_default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

/// Dashboard path for a user's role.
pub fn route_for_role(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Student) => "/student-dashboard",
        Some(Role::Mentor) => "/mentor-dashboard",
        None => "/login",
    }
}

#[derive(Serialize)]
struct SetRoleBody<'a> {
    role: &'a str,
}

impl ApiClient {
    /// The logged-in user. Fails fast without a token.
    pub async fn get_me(&self) -> Result<User, ClientError> {
        if !self.auth.is_authenticated() {
            tracing::debug!("No token found");
            return Err(ClientError::Unauthenticated);
        }
        let response: UserResponse = self.get("/api/me").await?;
        Ok(response.user)
    }

    /// Choose the user's role. The server only accepts this once.
    pub async fn set_user_role(&self, role: Role) -> Result<User, ClientError> {
        if !self.auth.is_authenticated() {
            return Err(ClientError::Unauthenticated);
        }
        let response: UserResponse = self
            .post("/api/user/role", &SetRoleBody { role: role.as_str() })
            .await?;
        Ok(response.user)
    }

    /// End the session. The local token is dropped even if the call fails.
    pub async fn logout(&mut self) {
        if let Err(e) = self
            .post::<serde_json::Value, _>("/api/logout", &serde_json::json!({}))
            .await
        {
            tracing::warn!(error = %e, "Logout request failed");
        }
        self.auth.clear();
    }

    /// Where to send the browser to start GitHub login.
    ///
    /// Always the backend itself; OAuth redirects cannot go through a proxy.
    pub fn github_login_url(&self, role: Option<Role>) -> String {
        match role {
            Some(role) => format!("{}/api/auth/github?role={}", self.backend_url, role.as_str()),
            None => format!("{}/api/auth/github", self.backend_url),
        }
    }
}
