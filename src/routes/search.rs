// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor search routes.

use crate::error::Result;
use crate::models::MentorProfile;
use crate::services::search::{self, MentorFilters};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/search/mentors", post(search_mentors))
        .route("/api/search/top-mentors", get(top_mentors))
}

/// Ranked mentors, best first.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MentorsResponse {
    pub mentors: Vec<MentorProfile>,
}

async fn search_mentors(
    State(state): State<Arc<AppState>>,
    Json(filters): Json<MentorFilters>,
) -> Result<Json<MentorsResponse>> {
    filters.validate()?;

    let mentors = search::search(state.db.list_mentor_profiles(), &filters);
    tracing::debug!(
        technologies = ?filters.technologies,
        results = mentors.len(),
        "Mentor search"
    );
    Ok(Json(MentorsResponse { mentors }))
}

#[derive(Debug, Default, Deserialize)]
pub struct TopMentorsQuery {
    pub technology: Option<String>,
    pub limit: Option<u32>,
}

async fn top_mentors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopMentorsQuery>,
) -> Result<Json<MentorsResponse>> {
    let mentors = search::top_mentors(
        state.db.list_mentor_profiles(),
        query.technology.as_deref(),
        query.limit,
    );
    Ok(Json(MentorsResponse { mentors }))
}
