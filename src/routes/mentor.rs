// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor profile details: skills, weekly availability, public view.

use super::profile::NewSkill;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{AvailabilitySlot, MentorProfile, MentorSkill, Review, Testimonial, User};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/mentor/{profile_id}/skills",
            get(get_skills).post(add_skills),
        )
        .route(
            "/api/mentor/{profile_id}/skills/{skill_id}",
            delete(delete_skill),
        )
        .route(
            "/api/mentor/{profile_id}/availability",
            get(get_availability).post(set_availability),
        )
        .route("/api/mentor/{profile_id}/complete", get(get_complete))
}

pub(super) fn load_profile(state: &AppState, profile_id: &str) -> Result<MentorProfile> {
    state
        .db
        .get_mentor_profile(profile_id)
        .ok_or_else(|| AppError::NotFound("Mentor profile not found".to_string()))
}

/// Apply `f` to a mentor profile owned by the caller.
pub(super) fn update_owned<F>(state: &AppState, auth: &AuthUser, profile_id: &str, f: F) -> Result<MentorProfile>
where
    F: FnOnce(&mut MentorProfile) -> Result<()>,
{
    state.db.update_mentor_profile(profile_id, |profile| {
        if profile.user_id != auth.user_id {
            return Err(AppError::Forbidden(
                "You can only edit your own mentor profile".to_string(),
            ));
        }
        f(profile)
    })
}

// ─── Skills ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddSkillsRequest {
    #[validate(length(min = 1, max = 50))]
    pub skills: Vec<NewSkill>,
}

async fn get_skills(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<MentorSkill>>> {
    Ok(Json(load_profile(&state, &profile_id)?.skills))
}

/// Add skills; a name that already exists (case-insensitive) has its level
/// updated instead.
async fn add_skills(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<AddSkillsRequest>,
) -> Result<Json<Vec<MentorSkill>>> {
    request.validate()?;
    if request.skills.iter().any(|s| s.name.trim().is_empty()) {
        return Err(AppError::BadRequest("Skill name cannot be empty".to_string()));
    }

    let profile = update_owned(&state, &auth, &profile_id, |p| {
        for skill in &request.skills {
            p.upsert_skill(&skill.name, skill.level);
        }
        Ok(())
    })?;

    Ok(Json(profile.skills))
}

async fn delete_skill(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, skill_id)): Path<(String, String)>,
) -> Result<Json<Vec<MentorSkill>>> {
    let profile = update_owned(&state, &auth, &profile_id, |p| {
        let before = p.skills.len();
        p.skills.retain(|s| s.id != skill_id);
        if p.skills.len() == before {
            return Err(AppError::NotFound("Skill not found".to_string()));
        }
        Ok(())
    })?;

    Ok(Json(profile.skills))
}

// ─── Availability ────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SetAvailabilityRequest {
    #[validate(length(max = 100))]
    pub schedule: Vec<AvailabilitySlot>,
}

fn check_slot(slot: &AvailabilitySlot) -> Result<()> {
    if slot.day_of_week > 6 {
        return Err(AppError::BadRequest(format!(
            "dayOfWeek must be 0..=6, got {}",
            slot.day_of_week
        )));
    }
    if slot.start_time >= slot.end_time {
        return Err(AppError::BadRequest(format!(
            "Availability start {} must be before end {}",
            slot.start_time.format("%H:%M"),
            slot.end_time.format("%H:%M")
        )));
    }
    Ok(())
}

async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<AvailabilitySlot>>> {
    Ok(Json(load_profile(&state, &profile_id)?.availability))
}

/// Replace the weekly schedule.
async fn set_availability(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<SetAvailabilityRequest>,
) -> Result<Json<Vec<AvailabilitySlot>>> {
    request.validate()?;
    for slot in &request.schedule {
        check_slot(slot)?;
    }

    let mut schedule = request.schedule;
    schedule.sort_by(|a, b| {
        a.day_of_week
            .cmp(&b.day_of_week)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });

    let profile = update_owned(&state, &auth, &profile_id, |p| {
        p.availability = schedule;
        Ok(())
    })?;

    Ok(Json(profile.availability))
}

// ─── Public View ─────────────────────────────────────────────

/// Everything the mentor detail page shows.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MentorDetails {
    pub profile: MentorProfile,
    pub user: Option<User>,
    pub reviews: Vec<Review>,
    pub testimonials: Vec<Testimonial>,
}

async fn get_complete(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<MentorDetails>> {
    let profile = load_profile(&state, &profile_id)?;
    let mentor_user_id = profile.user_id.clone();

    Ok(Json(MentorDetails {
        user: state.db.get_user(&mentor_user_id),
        reviews: state.db.list_reviews(|r| r.mentor_id == mentor_user_id),
        testimonials: state.db.list_testimonials(&profile.id, false),
        profile,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn slot(day: u8, start: (u32, u32), end: (u32, u32)) -> AvailabilitySlot {
        AvailabilitySlot {
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_check_slot() {
        assert!(check_slot(&slot(1, (9, 0), (10, 30))).is_ok());
        assert!(check_slot(&slot(7, (9, 0), (10, 0))).is_err());
        assert!(check_slot(&slot(2, (10, 0), (10, 0))).is_err());
        assert!(check_slot(&slot(2, (11, 0), (10, 0))).is_err());
    }

    #[test]
    fn test_slot_times_parse_single_digit_hours() {
        let parsed: AvailabilitySlot =
            serde_json::from_str(r#"{"dayOfWeek":1,"startTime":"9:00","endTime":"9:30"}"#).unwrap();
        assert_eq!(parsed, slot(1, (9, 0), (9, 30)));
        assert_eq!(
            serde_json::to_value(&parsed).unwrap()["startTime"],
            "09:00"
        );
    }
}
