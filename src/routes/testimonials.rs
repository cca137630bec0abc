// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor testimonials.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::Testimonial;
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/testimonials", post(create_testimonial))
        .route(
            "/api/testimonials/mentor/{profile_id}",
            get(list_testimonials),
        )
        .route("/api/testimonials/{testimonial_id}/featured", patch(set_featured))
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialRequest {
    pub mentor_profile_id: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<u8>,
}

async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateTestimonialRequest>,
) -> Result<(StatusCode, Json<Testimonial>)> {
    request.validate()?;

    let profile = state
        .db
        .get_mentor_profile(&request.mentor_profile_id)
        .ok_or_else(|| AppError::NotFound("Mentor profile not found".to_string()))?;
    if profile.user_id == auth.user_id {
        return Err(AppError::BadRequest(
            "You cannot write a testimonial for yourself".to_string(),
        ));
    }

    let testimonial = Testimonial {
        id: uuid::Uuid::new_v4().to_string(),
        mentor_profile_id: profile.id,
        author_id: auth.user_id,
        content: request.content.trim().to_string(),
        rating: request.rating,
        featured: false,
        created_at: now_rfc3339(),
    };
    state.db.insert_testimonial(&testimonial);

    Ok((StatusCode::CREATED, Json(testimonial)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub featured: bool,
}

async fn list_testimonials(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Testimonial>>> {
    Ok(Json(state.db.list_testimonials(&profile_id, query.featured)))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeaturedRequest {
    pub featured: bool,
}

/// Feature or unfeature a testimonial. Only the mentor it praises may.
async fn set_featured(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(testimonial_id): Path<String>,
    Json(request): Json<FeaturedRequest>,
) -> Result<Json<Testimonial>> {
    let existing = state
        .db
        .get_testimonial(&testimonial_id)
        .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;

    let owner = state
        .db
        .get_mentor_profile(&existing.mentor_profile_id)
        .map(|p| p.user_id);
    if owner.as_deref() != Some(auth.user_id.as_str()) {
        return Err(AppError::Forbidden(
            "Only the mentor can feature testimonials".to_string(),
        ));
    }

    let updated = state
        .db
        .update_testimonial(&testimonial_id, |t| t.featured = request.featured)?;
    Ok(Json(updated))
}
