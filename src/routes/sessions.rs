// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session booking, lifecycle, outcomes and reviews.

use super::require_self;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::review::average_rating;
use crate::models::session::minutes_between;
use crate::models::{
    Participant, Review, Role, Session, SessionOutcome, SessionStats, SessionStatus,
    StatusChange, TransitionError,
};
use crate::services::search::MAX_LIMIT;
use crate::time_utils::{clock_time, now_rfc3339};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{session_id}", get(get_session))
        .route("/api/sessions/{session_id}/status", patch(update_status))
        .route("/api/sessions/{session_id}/outcome", patch(update_outcome))
        .route(
            "/api/sessions/{session_id}/reviews",
            get(get_session_reviews).post(create_review),
        )
        .route("/api/sessions/user/{user_id}", get(get_user_sessions))
        .route("/api/sessions/stats/{user_id}", get(get_session_stats))
        .route(
            "/api/sessions/mentor/{mentor_id}/reviews",
            get(get_mentor_reviews),
        )
}

/// Parse the `role` query parameter of the listing endpoints.
fn parse_side(raw: Option<&str>) -> Result<Option<Participant>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some("mentor") => Ok(Some(Participant::Mentor)),
        Some("contributor") | Some("student") => Ok(Some(Participant::Contributor)),
        Some(other) => Err(AppError::BadRequest(format!("Unknown role: {}", other))),
    }
}

fn parse_status(raw: &str) -> Result<SessionStatus> {
    SessionStatus::parse(raw.trim())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid session status: {}", raw)))
}

fn involves(session: &Session, user_id: &str, side: Option<Participant>) -> bool {
    match side {
        Some(Participant::Mentor) => session.mentor_id == user_id,
        Some(Participant::Contributor) => session.contributor_id == user_id,
        None => session.participant(user_id).is_some(),
    }
}

fn load_session_for(state: &AppState, session_id: &str, user_id: &str) -> Result<Session> {
    let session = state
        .db
        .get_session(session_id)
        .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
    if session.participant(user_id).is_none() {
        return Err(AppError::Forbidden(
            "You are not a participant in this session".to_string(),
        ));
    }
    Ok(session)
}

// ─── Booking ─────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Mentor's user ID
    pub mentor_id: String,
    /// Defaults to the caller
    pub contributor_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub scheduled_date: NaiveDate,
    #[serde(with = "clock_time")]
    pub scheduled_start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub scheduled_end_time: NaiveTime,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    #[validate(length(max = 25))]
    pub technologies: Vec<String>,
    #[validate(url)]
    pub meeting_link: Option<String>,
}

async fn create_session(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<Session>)> {
    request.validate()?;

    let contributor_id = request
        .contributor_id
        .unwrap_or_else(|| auth.user_id.clone());
    require_self(&auth, &contributor_id)?;

    if request.mentor_id == contributor_id {
        return Err(AppError::BadRequest(
            "You cannot book a session with yourself".to_string(),
        ));
    }
    if request.scheduled_start_time >= request.scheduled_end_time {
        return Err(AppError::BadRequest(
            "scheduledStartTime must be before scheduledEndTime".to_string(),
        ));
    }

    let mentor = state
        .db
        .get_user(&request.mentor_id)
        .filter(|u| u.role == Some(Role::Mentor))
        .ok_or_else(|| AppError::NotFound("Mentor not found".to_string()))?;

    let now = now_rfc3339();
    let session = Session {
        id: uuid::Uuid::new_v4().to_string(),
        mentor_id: mentor.id.clone(),
        contributor_id,
        topic: request.topic.trim().to_string(),
        description: request.description,
        scheduled_date: request.scheduled_date,
        scheduled_start_time: request.scheduled_start_time,
        scheduled_end_time: request.scheduled_end_time,
        duration_minutes: Some(request.duration_minutes.unwrap_or_else(|| {
            minutes_between(request.scheduled_start_time, request.scheduled_end_time)
        })),
        technologies: request.technologies,
        status: SessionStatus::Pending,
        meeting_link: request.meeting_link,
        outcome: None,
        created_at: now.clone(),
        updated_at: now,
    };
    state.db.insert_session(&session);

    state.db.update_mentor_profile_by_user(&mentor.id, |p| {
        p.total_sessions += 1;
        Ok(())
    })?;

    tracing::info!(
        session_id = %session.id,
        mentor_id = %session.mentor_id,
        contributor_id = %session.contributor_id,
        "Session booked"
    );
    Ok((StatusCode::CREATED, Json(session)))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>> {
    load_session_for(&state, &session_id, &auth.user_id).map(Json)
}

// ─── Lifecycle ───────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Session>> {
    let next = parse_status(&request.status)?;

    let (session, change) = state.db.update_session(&session_id, |session| {
        let who = session.participant(&auth.user_id).ok_or_else(|| {
            AppError::Forbidden("You are not a participant in this session".to_string())
        })?;
        session
            .apply_status(next, who, &now_rfc3339())
            .map_err(|e| match e {
                TransitionError::Illegal { .. } => AppError::Conflict(e.to_string()),
                TransitionError::NotPermitted { .. } => AppError::Forbidden(e.to_string()),
            })
    })?;

    if let StatusChange::Changed { from, to } = change {
        tracing::info!(session_id = %session.id, %from, %to, "Session status changed");
        record_counters(&state, &session.mentor_id, to)?;
    }

    Ok(Json(session))
}

/// Bump the mentor's lifetime counters for a status just entered.
fn record_counters(state: &AppState, mentor_id: &str, entered: SessionStatus) -> Result<()> {
    match entered {
        SessionStatus::Completed => {
            state.db.update_mentor_profile_by_user(mentor_id, |p| {
                p.completed_sessions += 1;
                Ok(())
            })?;
        }
        SessionStatus::Cancelled => {
            state.db.update_mentor_profile_by_user(mentor_id, |p| {
                p.cancelled_sessions += 1;
                Ok(())
            })?;
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcomeRequest {
    #[validate(length(min = 1, max = 5000))]
    pub summary: String,
    #[validate(range(min = 1, max = 1440))]
    pub actual_duration_minutes: Option<u32>,
    #[serde(default)]
    pub follow_up_needed: bool,
}

async fn update_outcome(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<String>,
    Json(request): Json<UpdateOutcomeRequest>,
) -> Result<Json<Session>> {
    request.validate()?;

    let (session, ()) = state.db.update_session(&session_id, |session| {
        if session.participant(&auth.user_id).is_none() {
            return Err(AppError::Forbidden(
                "You are not a participant in this session".to_string(),
            ));
        }
        if session.status != SessionStatus::Completed {
            return Err(AppError::Conflict(
                "Outcome can only be recorded for completed sessions".to_string(),
            ));
        }
        let now = now_rfc3339();
        session.outcome = Some(SessionOutcome {
            summary: request.summary,
            actual_duration_minutes: request.actual_duration_minutes,
            follow_up_needed: request.follow_up_needed,
            recorded_at: now.clone(),
        });
        session.updated_at = now;
        Ok(())
    })?;

    Ok(Json(session))
}

// ─── Listings ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct UserSessionsQuery {
    pub role: Option<String>,
    pub status: Option<String>,
}

async fn get_user_sessions(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Query(query): Query<UserSessionsQuery>,
) -> Result<Json<Vec<Session>>> {
    require_self(&auth, &user_id)?;
    let side = parse_side(query.role.as_deref())?;
    let status = query
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(parse_status)
        .transpose()?;

    let sessions = state.db.list_sessions(|s| {
        involves(s, &user_id, side) && status.map_or(true, |wanted| s.status == wanted)
    });

    Ok(Json(sessions))
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub role: Option<String>,
}

async fn get_session_stats(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<SessionStats>> {
    require_self(&auth, &user_id)?;
    let side = parse_side(query.role.as_deref())?;

    let sessions = state.db.list_sessions(|s| involves(s, &user_id, side));
    Ok(Json(SessionStats::tally(&sessions)))
}

// ─── Reviews ─────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(session_id): Path<String>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    request.validate()?;

    let session = load_session_for(&state, &session_id, &auth.user_id)?;
    if session.participant(&auth.user_id) != Some(Participant::Contributor) {
        return Err(AppError::Forbidden(
            "Only the contributor can review a session".to_string(),
        ));
    }
    if session.status != SessionStatus::Completed {
        return Err(AppError::Conflict(
            "Only completed sessions can be reviewed".to_string(),
        ));
    }

    let review = Review {
        id: uuid::Uuid::new_v4().to_string(),
        session_id: session.id.clone(),
        mentor_id: session.mentor_id.clone(),
        reviewer_id: auth.user_id.clone(),
        rating: request.rating,
        comment: request.comment,
        created_at: now_rfc3339(),
    };
    state.db.insert_review(&review)?;

    // Recomputed under the profile's entry lock
    let profile = state
        .db
        .update_mentor_profile_by_user(&session.mentor_id, |p| {
            p.overall_rating =
                average_rating(&state.db.list_reviews(|r| r.mentor_id == session.mentor_id));
            Ok(())
        })?;
    let rating = profile.map(|p| p.overall_rating).unwrap_or_default();

    tracing::info!(
        session_id = %session.id,
        mentor_id = %session.mentor_id,
        overall_rating = rating,
        "Review recorded"
    );
    Ok((StatusCode::CREATED, Json(review)))
}

async fn get_session_reviews(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<Review>>> {
    if state.db.get_session(&session_id).is_none() {
        return Err(AppError::NotFound("Session not found".to_string()));
    }
    Ok(Json(state.db.list_reviews(|r| r.session_id == session_id)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorReviewsQuery {
    pub min_rating: Option<u8>,
    pub limit: Option<u32>,
}

async fn get_mentor_reviews(
    State(state): State<Arc<AppState>>,
    Path(mentor_id): Path<String>,
    Query(query): Query<MentorReviewsQuery>,
) -> Result<Json<Vec<Review>>> {
    let min_rating = query.min_rating.unwrap_or(0);
    let mut reviews = state
        .db
        .list_reviews(|r| r.mentor_id == mentor_id && r.rating >= min_rating);
    if let Some(limit) = query.limit {
        reviews.truncate(limit.clamp(1, MAX_LIMIT) as usize);
    }
    Ok(Json(reviews))
}
