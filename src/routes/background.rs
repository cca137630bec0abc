// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor background routes: expertise, specializations, work experience,
//! certifications, competitions, open source work, badges, days off.
//!
//! Reads are open to any signed-in user; writes only to the profile owner.

use super::mentor::{load_profile, update_owned};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::background::{find_entry, merge_labels, remove_entry, sort_experience};
use crate::models::mentor::skill_key;
use crate::models::{
    Badge, Certification, CompetitionEntry, OpenSourceAchievement, UnavailableDate,
    WorkExperience,
};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/mentor/{profile_id}/expertise",
            get(get_expertise).post(add_expertise),
        )
        .route(
            "/api/mentor/{profile_id}/specializations",
            get(get_specializations).post(add_specializations),
        )
        .route(
            "/api/mentor/{profile_id}/experience",
            get(get_experience).post(add_experience),
        )
        .route(
            "/api/mentor/{profile_id}/experience/{entry_id}",
            patch(update_experience).delete(delete_experience),
        )
        .route(
            "/api/mentor/{profile_id}/certifications",
            get(get_certifications).post(add_certification),
        )
        .route(
            "/api/mentor/{profile_id}/certifications/{entry_id}",
            delete(delete_certification),
        )
        .route(
            "/api/mentor/{profile_id}/competitions",
            get(get_competitions).post(add_competition),
        )
        .route(
            "/api/mentor/{profile_id}/competitions/{entry_id}",
            patch(update_competition).delete(delete_competition),
        )
        .route(
            "/api/mentor/{profile_id}/opensource",
            get(get_open_source).post(add_open_source),
        )
        .route(
            "/api/mentor/{profile_id}/badges",
            get(get_badges).post(add_badge),
        )
        .route(
            "/api/mentor/{profile_id}/unavailable",
            get(get_unavailable).post(add_unavailable),
        )
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ─── Expertise & Specializations ─────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddExpertiseRequest {
    #[validate(length(min = 1, max = 50))]
    pub expertise_areas: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddSpecializationsRequest {
    #[validate(length(min = 1, max = 50))]
    pub specializations: Vec<String>,
}

async fn get_expertise(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(load_profile(&state, &profile_id)?.expertise_areas))
}

/// Add expertise areas; names already listed (case-insensitive) are kept once.
async fn add_expertise(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<AddExpertiseRequest>,
) -> Result<Json<Vec<String>>> {
    request.validate()?;
    let profile = update_owned(&state, &auth, &profile_id, |p| {
        merge_labels(&mut p.expertise_areas, &request.expertise_areas);
        Ok(())
    })?;
    Ok(Json(profile.expertise_areas))
}

async fn get_specializations(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(load_profile(&state, &profile_id)?.specializations))
}

async fn add_specializations(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<AddSpecializationsRequest>,
) -> Result<Json<Vec<String>>> {
    request.validate()?;
    let profile = update_owned(&state, &auth, &profile_id, |p| {
        merge_labels(&mut p.specializations, &request.specializations);
        Ok(())
    })?;
    Ok(Json(profile.specializations))
}

// ─── Work Experience ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkExperience {
    #[validate(length(min = 1, max = 120))]
    pub company: String,
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkExperience {
    #[validate(length(min = 1, max = 120))]
    pub company: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

fn check_dates(entry: &WorkExperience) -> Result<()> {
    match entry.end_date {
        Some(end) if end < entry.start_date => Err(AppError::BadRequest(format!(
            "endDate {} is before startDate {}",
            end, entry.start_date
        ))),
        _ => Ok(()),
    }
}

async fn get_experience(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<WorkExperience>>> {
    Ok(Json(load_profile(&state, &profile_id)?.experience))
}

async fn add_experience(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<NewWorkExperience>,
) -> Result<(StatusCode, Json<WorkExperience>)> {
    request.validate()?;
    let entry = WorkExperience {
        id: new_id(),
        company: request.company,
        title: request.title,
        start_date: request.start_date,
        end_date: request.end_date,
        description: request.description,
    };
    check_dates(&entry)?;

    update_owned(&state, &auth, &profile_id, |p| {
        p.experience.push(entry.clone());
        sort_experience(&mut p.experience);
        Ok(())
    })?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_experience(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, entry_id)): Path<(String, String)>,
    Json(request): Json<UpdateWorkExperience>,
) -> Result<Json<WorkExperience>> {
    request.validate()?;
    let mut updated = None;

    update_owned(&state, &auth, &profile_id, |p| {
        let entry = find_entry(&mut p.experience, &entry_id)
            .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))?;
        let mut next = entry.clone();
        if let Some(company) = request.company {
            next.company = company;
        }
        if let Some(title) = request.title {
            next.title = title;
        }
        if let Some(start_date) = request.start_date {
            next.start_date = start_date;
        }
        if request.end_date.is_some() {
            next.end_date = request.end_date;
        }
        if let Some(description) = request.description {
            next.description = Some(description);
        }
        check_dates(&next)?;

        *entry = next.clone();
        sort_experience(&mut p.experience);
        updated = Some(next);
        Ok(())
    })?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))
}

async fn delete_experience(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, entry_id)): Path<(String, String)>,
) -> Result<Json<Vec<WorkExperience>>> {
    let profile = update_owned(&state, &auth, &profile_id, |p| {
        if !remove_entry(&mut p.experience, &entry_id) {
            return Err(AppError::NotFound("Experience not found".to_string()));
        }
        Ok(())
    })?;
    Ok(Json(profile.experience))
}

// ─── Certifications ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCertification {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 120))]
    pub issuer: String,
    pub issued_on: Option<NaiveDate>,
    #[validate(url)]
    pub credential_url: Option<String>,
}

async fn get_certifications(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<Certification>>> {
    Ok(Json(load_profile(&state, &profile_id)?.certifications))
}

async fn add_certification(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<NewCertification>,
) -> Result<(StatusCode, Json<Certification>)> {
    request.validate()?;
    let entry = Certification {
        id: new_id(),
        name: request.name,
        issuer: request.issuer,
        issued_on: request.issued_on,
        credential_url: request.credential_url,
    };

    update_owned(&state, &auth, &profile_id, |p| {
        p.certifications.push(entry.clone());
        Ok(())
    })?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn delete_certification(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, entry_id)): Path<(String, String)>,
) -> Result<Json<Vec<Certification>>> {
    let profile = update_owned(&state, &auth, &profile_id, |p| {
        if !remove_entry(&mut p.certifications, &entry_id) {
            return Err(AppError::NotFound("Certification not found".to_string()));
        }
        Ok(())
    })?;
    Ok(Json(profile.certifications))
}

// ─── Competitions ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCompetitionEntry {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 1970, max = 2100))]
    pub year: u16,
    #[validate(length(max = 60))]
    pub placement: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompetitionEntry {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(range(min = 1970, max = 2100))]
    pub year: Option<u16>,
    #[validate(length(max = 60))]
    pub placement: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

async fn get_competitions(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<CompetitionEntry>>> {
    Ok(Json(load_profile(&state, &profile_id)?.competitions))
}

async fn add_competition(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<NewCompetitionEntry>,
) -> Result<(StatusCode, Json<CompetitionEntry>)> {
    request.validate()?;
    let entry = CompetitionEntry {
        id: new_id(),
        name: request.name,
        year: request.year,
        placement: request.placement,
        description: request.description,
    };

    update_owned(&state, &auth, &profile_id, |p| {
        p.competitions.push(entry.clone());
        p.competitions.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(())
    })?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_competition(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, entry_id)): Path<(String, String)>,
    Json(request): Json<UpdateCompetitionEntry>,
) -> Result<Json<CompetitionEntry>> {
    request.validate()?;
    let mut updated = None;

    update_owned(&state, &auth, &profile_id, |p| {
        let entry = find_entry(&mut p.competitions, &entry_id)
            .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))?;
        if let Some(name) = request.name {
            entry.name = name;
        }
        if let Some(year) = request.year {
            entry.year = year;
        }
        if let Some(placement) = request.placement {
            entry.placement = Some(placement);
        }
        if let Some(description) = request.description {
            entry.description = Some(description);
        }
        updated = Some(entry.clone());
        p.competitions.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(())
    })?;

    updated
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Competition not found".to_string()))
}

async fn delete_competition(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path((profile_id, entry_id)): Path<(String, String)>,
) -> Result<Json<Vec<CompetitionEntry>>> {
    let profile = update_owned(&state, &auth, &profile_id, |p| {
        if !remove_entry(&mut p.competitions, &entry_id) {
            return Err(AppError::NotFound("Competition not found".to_string()));
        }
        Ok(())
    })?;
    Ok(Json(profile.competitions))
}

// ─── Open Source & Badges ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewOpenSourceAchievement {
    #[validate(length(min = 1, max = 120))]
    pub project: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(url)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBadge {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

async fn get_open_source(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<OpenSourceAchievement>>> {
    Ok(Json(load_profile(&state, &profile_id)?.open_source))
}

async fn add_open_source(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<NewOpenSourceAchievement>,
) -> Result<(StatusCode, Json<OpenSourceAchievement>)> {
    request.validate()?;
    let entry = OpenSourceAchievement {
        id: new_id(),
        project: request.project,
        description: request.description,
        url: request.url,
    };

    update_owned(&state, &auth, &profile_id, |p| {
        p.open_source.push(entry.clone());
        Ok(())
    })?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn get_badges(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<Badge>>> {
    Ok(Json(load_profile(&state, &profile_id)?.badges))
}

/// Award a badge. A badge name is held at most once (case-insensitive).
async fn add_badge(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<NewBadge>,
) -> Result<(StatusCode, Json<Badge>)> {
    request.validate()?;
    let badge = Badge {
        id: new_id(),
        name: request.name.trim().to_string(),
        description: request.description,
        awarded_at: now_rfc3339(),
    };

    update_owned(&state, &auth, &profile_id, |p| {
        let key = skill_key(&badge.name);
        if p.badges.iter().any(|b| skill_key(&b.name) == key) {
            return Err(AppError::Conflict(format!(
                "Badge '{}' already awarded",
                badge.name
            )));
        }
        p.badges.push(badge.clone());
        Ok(())
    })?;

    tracing::info!(profile_id = %profile_id, badge = %badge.name, "Badge awarded");
    Ok((StatusCode::CREATED, Json(badge)))
}

// ─── Unavailable Dates ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUnavailableDate {
    pub date: NaiveDate,
    #[validate(length(max = 200))]
    pub reason: Option<String>,
}

async fn get_unavailable(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Vec<UnavailableDate>>> {
    Ok(Json(load_profile(&state, &profile_id)?.unavailable_dates))
}

/// Block out a day. Dates are kept in calendar order, one entry per date.
async fn add_unavailable(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
    Json(request): Json<NewUnavailableDate>,
) -> Result<(StatusCode, Json<UnavailableDate>)> {
    request.validate()?;
    let entry = UnavailableDate {
        id: new_id(),
        date: request.date,
        reason: request.reason,
    };

    update_owned(&state, &auth, &profile_id, |p| {
        if p.unavailable_dates.iter().any(|d| d.date == entry.date) {
            return Err(AppError::Conflict(format!(
                "{} is already marked unavailable",
                entry.date
            )));
        }
        p.unavailable_dates.push(entry.clone());
        p.unavailable_dates.sort_by_key(|d| d.date);
        Ok(())
    })?;
    Ok((StatusCode::CREATED, Json(entry)))
}
