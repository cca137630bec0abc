// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub metrics routes.

use super::require_self;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::user::{ContributionsCollection, GithubProfile};
use crate::models::GithubData;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/github/profile/{user_id}", get(get_github_profile))
        .route("/api/github/sync-contributions", post(sync_contributions))
}

async fn get_github_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<GithubData>> {
    let user = state
        .db
        .get_user(&user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    user.github_data
        .map(Json)
        .ok_or_else(|| AppError::NotFound("GitHub data not found".to_string()))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncContributionsRequest {
    pub user_id: String,
    pub contributions: ContributionsCollection,
}

/// Replace the stored contribution counters.
async fn sync_contributions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<SyncContributionsRequest>,
) -> Result<Json<GithubData>> {
    require_self(&auth, &request.user_id)?;

    let user = state.db.update_user(&request.user_id, |u| {
        let login = u.username.clone();
        let data = u.github_data.get_or_insert_with(|| GithubData {
            profile: GithubProfile {
                login,
                ..Default::default()
            },
            ..Default::default()
        });
        data.contributions_collection = request.contributions;
        Ok(())
    })?;

    tracing::info!(
        user_id = %user.id,
        total = user
            .github_data
            .as_ref()
            .map(|d| d.contributions_collection.total_contributions)
            .unwrap_or(0),
        "GitHub contributions synced"
    );

    user.github_data
        .map(Json)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("GitHub data missing after sync")))
}
