// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub OAuth and REST client.
//!
//! Handles:
//! - Building the authorize URL
//! - Exchanging the callback code for an access token
//! - Fetching the authenticated user's profile
//! - Turning that profile into a MentorHub user

use crate::db::Store;
use crate::error::AppError;
use crate::models::user::{GithubData, GithubProfile, GithubSummary};
use crate::models::{Role, User};
use crate::time_utils::now_rfc3339;
use serde::Deserialize;

const USER_AGENT: &str = "mentorhub-api";

/// GitHub API client.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    oauth_base: String,
    client_id: String,
    client_secret: String,
}

impl GithubClient {
    /// Create a new GitHub client with OAuth app credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_urls(
            client_id,
            client_secret,
            "https://api.github.com",
            "https://github.com",
        )
    }

    /// Client pointed at alternate hosts (GitHub Enterprise, local fakes).
    pub fn with_base_urls(
        client_id: String,
        client_secret: String,
        api_base: &str,
        oauth_base: &str,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            oauth_base: oauth_base.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
        }
    }

    /// URL the browser is sent to for consent.
    pub fn authorize_url(&self, callback_url: &str, state: &str) -> String {
        format!(
            "{}/login/oauth/authorize?client_id={}&redirect_uri={}&scope={}&state={}",
            self.oauth_base,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(callback_url),
            urlencoding::encode("read:user user:email"),
            urlencoding::encode(state),
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// GitHub answers `200` even for a bad code, with an `error` field.
    pub async fn exchange_code(&self, code: &str, callback_url: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(format!("{}/login/oauth/access_token", self.oauth_base))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", callback_url),
            ])
            .send()
            .await
            .map_err(|e| AppError::GithubApi(format!("Token exchange request failed: {}", e)))?;

        let token: TokenResponse = self.check_response_json(response).await?;
        match token {
            TokenResponse {
                access_token: Some(access_token),
                ..
            } => Ok(access_token),
            TokenResponse {
                error, error_description, ..
            } => Err(AppError::GithubApi(format!(
                "{}: {}",
                error.unwrap_or_else(|| "unknown_error".to_string()),
                error_description.unwrap_or_default()
            ))),
        }
    }

    /// Get the authenticated user's profile.
    pub async fn get_user(&self, access_token: &str) -> Result<GithubUser, AppError> {
        let response = self
            .http
            .get(format!("{}/user", self.api_base))
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| AppError::GithubApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 403 || status.as_u16() == 429 {
                tracing::warn!(status = status.as_u16(), "GitHub rate limit hit");
            }

            return Err(AppError::GithubApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GithubApi(format!("JSON parse error: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Subset of `GET /user` we store.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub public_repos: u32,
}

impl GithubUser {
    fn to_github_data(&self, previous: Option<&GithubData>) -> GithubData {
        GithubData {
            profile: GithubProfile {
                login: self.login.clone(),
                name: self.name.clone(),
                avatar_url: self.avatar_url.clone(),
                followers: self.followers,
                public_repos: self.public_repos,
            },
            summary: GithubSummary {
                total_repositories: self.public_repos,
            },
            // Contributions come from the sync endpoint; keep what we had.
            contributions_collection: previous
                .map(|d| d.contributions_collection.clone())
                .unwrap_or_default(),
        }
    }
}

/// Create or refresh the MentorHub user for a GitHub login.
///
/// `requested_role` is applied only when the user has no role yet.
pub fn upsert_github_user(
    store: &Store,
    github: &GithubUser,
    requested_role: Option<Role>,
) -> Result<User, AppError> {
    let (user, created) = store.get_or_insert_user_by_username(&github.login, || User {
        id: uuid::Uuid::new_v4().to_string(),
        username: github.login.clone(),
        email: github.email.clone(),
        display_name: github.name.clone(),
        avatar_url: github.avatar_url.clone(),
        bio: github.bio.clone(),
        role: requested_role,
        github_data: Some(github.to_github_data(None)),
        created_at: now_rfc3339(),
    });
    if created {
        tracing::info!(username = %user.username, "Created user from GitHub login");
        return Ok(user);
    }

    store.update_user(&user.id, |user| {
        user.github_data = Some(github.to_github_data(user.github_data.as_ref()));
        if github.avatar_url.is_some() {
            user.avatar_url = github.avatar_url.clone();
        }
        if user.email.is_none() {
            user.email = github.email.clone();
        }
        if user.role.is_none() {
            user.role = requested_role;
        }
        Ok(())
    })
}
