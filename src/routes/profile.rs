// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes: user details, mentor profile, contributor profile.

use super::require_self;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ContributorProfile, MentorProfile, Role, SkillLevel, User};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile/complete/{user_id}", get(get_complete_profile))
        .route("/api/profile/user/{user_id}", patch(update_user))
        .route(
            "/api/profile/mentor/{user_id}",
            patch(update_mentor_profile).post(create_mentor_profile),
        )
        .route(
            "/api/profile/contributor/{user_id}",
            patch(upsert_contributor_profile),
        )
}

/// User plus whichever role profile exists.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProfile {
    pub user: User,
    pub mentor_profile: Option<MentorProfile>,
    pub contributor_profile: Option<ContributorProfile>,
}

async fn get_complete_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CompleteProfile>> {
    let user = state
        .db
        .get_user(&user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(CompleteProfile {
        mentor_profile: state.db.get_mentor_profile_by_user(&user_id),
        contributor_profile: state.db.get_contributor_profile(&user_id),
        user,
    }))
}

// ─── User Details ────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    require_self(&auth, &user_id)?;
    request.validate()?;

    let user = state.db.update_user(&user_id, |u| {
        if let Some(display_name) = request.display_name {
            u.display_name = Some(display_name);
        }
        if let Some(bio) = request.bio {
            u.bio = Some(bio);
        }
        if let Some(avatar_url) = request.avatar_url {
            u.avatar_url = Some(avatar_url);
        }
        Ok(())
    })?;

    Ok(Json(user))
}

// ─── Mentor Profile ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentorProfileRequest {
    #[validate(length(min = 1, max = 120))]
    pub headline: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub bio: String,
    #[validate(range(min = 0.0))]
    pub hourly_rate: f64,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub skills: Vec<NewSkill>,
}

async fn create_mentor_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateMentorProfileRequest>,
) -> Result<(StatusCode, Json<MentorProfile>)> {
    require_self(&auth, &user_id)?;
    request.validate()?;

    let user = state
        .db
        .get_user(&user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    if user.role != Some(Role::Mentor) {
        return Err(AppError::Forbidden(
            "Only mentors can create a mentor profile".to_string(),
        ));
    }

    let mut profile =
        MentorProfile::new(&user_id, request.headline, request.bio, request.hourly_rate);
    for skill in &request.skills {
        if !skill.name.trim().is_empty() {
            profile.upsert_skill(&skill.name, skill.level);
        }
    }
    state.db.insert_mentor_profile(&profile)?;

    tracing::info!(user_id = %user_id, profile_id = %profile.id, "Mentor profile created");
    Ok((StatusCode::CREATED, Json(profile)))
}

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMentorProfileRequest {
    #[validate(length(min = 1, max = 120))]
    pub headline: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,
}

async fn update_mentor_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateMentorProfileRequest>,
) -> Result<Json<MentorProfile>> {
    require_self(&auth, &user_id)?;
    request.validate()?;

    let profile = state
        .db
        .update_mentor_profile_by_user(&user_id, |p| {
            if let Some(headline) = request.headline {
                p.headline = headline;
            }
            if let Some(bio) = request.bio {
                p.bio = bio;
            }
            if let Some(rate) = request.hourly_rate {
                p.hourly_rate = rate;
            }
            Ok(())
        })?
        .ok_or_else(|| AppError::NotFound("Mentor profile not found".to_string()))?;

    Ok(Json(profile))
}

// ─── Contributor Profile ─────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContributorProfileRequest {
    #[validate(length(max = 50))]
    pub interests: Option<Vec<String>>,
    #[validate(length(max = 2000))]
    pub goals: Option<String>,
    pub experience_level: Option<SkillLevel>,
}

async fn upsert_contributor_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateContributorProfileRequest>,
) -> Result<Json<ContributorProfile>> {
    require_self(&auth, &user_id)?;
    request.validate()?;

    let profile = state.db.upsert_contributor_profile(&user_id, |p| {
        if let Some(interests) = request.interests {
            p.interests = interests;
        }
        if let Some(goals) = request.goals {
            p.goals = Some(goals);
        }
        if let Some(level) = request.experience_level {
            p.experience_level = Some(level);
        }
    });

    Ok(Json(profile))
}
