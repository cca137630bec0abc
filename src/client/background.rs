// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor background: expertise, work history, credentials, badges, days off.

use super::{ApiClient, ClientError};
use crate::models::{
    Badge, Certification, CompetitionEntry, OpenSourceAchievement, UnavailableDate,
    WorkExperience,
};
use crate::routes::background::{
    AddExpertiseRequest, AddSpecializationsRequest, NewBadge, NewCertification,
    NewCompetitionEntry, NewOpenSourceAchievement, NewUnavailableDate, NewWorkExperience,
    UpdateCompetitionEntry, UpdateWorkExperience,
};
use urlencoding::encode;

/// `/api/mentor/{id}/{section}`, with an optional entry ID appended.
fn mentor_path(mentor_profile_id: &str, section: &str, entry_id: Option<&str>) -> String {
    match entry_id {
        Some(entry_id) => format!(
            "/api/mentor/{}/{}/{}",
            encode(mentor_profile_id),
            section,
            encode(entry_id)
        ),
        None => format!("/api/mentor/{}/{}", encode(mentor_profile_id), section),
    }
}

impl ApiClient {
    pub async fn add_mentor_expertise(
        &self,
        mentor_profile_id: &str,
        expertise_areas: Vec<String>,
    ) -> Result<Vec<String>, ClientError> {
        self.post(
            &mentor_path(mentor_profile_id, "expertise", None),
            &AddExpertiseRequest { expertise_areas },
        )
        .await
    }

    pub async fn get_mentor_expertise(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<String>, ClientError> {
        self.get(&mentor_path(mentor_profile_id, "expertise", None))
            .await
    }

    pub async fn add_mentor_specializations(
        &self,
        mentor_profile_id: &str,
        specializations: Vec<String>,
    ) -> Result<Vec<String>, ClientError> {
        self.post(
            &mentor_path(mentor_profile_id, "specializations", None),
            &AddSpecializationsRequest { specializations },
        )
        .await
    }

    pub async fn get_mentor_specializations(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<String>, ClientError> {
        self.get(&mentor_path(mentor_profile_id, "specializations", None))
            .await
    }

    // ─── Work Experience ─────────────────────────────────────

    pub async fn add_work_experience(
        &self,
        mentor_profile_id: &str,
        experience: &NewWorkExperience,
    ) -> Result<WorkExperience, ClientError> {
        self.post(&mentor_path(mentor_profile_id, "experience", None), experience)
            .await
    }

    /// Work history, current position first.
    pub async fn get_work_experience(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<WorkExperience>, ClientError> {
        self.get(&mentor_path(mentor_profile_id, "experience", None))
            .await
    }

    pub async fn update_work_experience(
        &self,
        mentor_profile_id: &str,
        experience_id: &str,
        changes: &UpdateWorkExperience,
    ) -> Result<WorkExperience, ClientError> {
        self.patch(
            &mentor_path(mentor_profile_id, "experience", Some(experience_id)),
            changes,
        )
        .await
    }

    /// Returns the remaining entries.
    pub async fn delete_work_experience(
        &self,
        mentor_profile_id: &str,
        experience_id: &str,
    ) -> Result<Vec<WorkExperience>, ClientError> {
        self.delete(&mentor_path(
            mentor_profile_id,
            "experience",
            Some(experience_id),
        ))
        .await
    }

    // ─── Certifications ──────────────────────────────────────

    pub async fn add_certification(
        &self,
        mentor_profile_id: &str,
        certification: &NewCertification,
    ) -> Result<Certification, ClientError> {
        self.post(
            &mentor_path(mentor_profile_id, "certifications", None),
            certification,
        )
        .await
    }

    pub async fn get_certifications(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<Certification>, ClientError> {
        self.get(&mentor_path(mentor_profile_id, "certifications", None))
            .await
    }

    pub async fn delete_certification(
        &self,
        mentor_profile_id: &str,
        certification_id: &str,
    ) -> Result<Vec<Certification>, ClientError> {
        self.delete(&mentor_path(
            mentor_profile_id,
            "certifications",
            Some(certification_id),
        ))
        .await
    }

    // ─── Competitions ────────────────────────────────────────

    pub async fn add_competition_experience(
        &self,
        mentor_profile_id: &str,
        competition: &NewCompetitionEntry,
    ) -> Result<CompetitionEntry, ClientError> {
        self.post(
            &mentor_path(mentor_profile_id, "competitions", None),
            competition,
        )
        .await
    }

    /// Competition results, most recent year first.
    pub async fn get_competition_experience(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<CompetitionEntry>, ClientError> {
        self.get(&mentor_path(mentor_profile_id, "competitions", None))
            .await
    }

    pub async fn update_competition_experience(
        &self,
        mentor_profile_id: &str,
        competition_id: &str,
        changes: &UpdateCompetitionEntry,
    ) -> Result<CompetitionEntry, ClientError> {
        self.patch(
            &mentor_path(mentor_profile_id, "competitions", Some(competition_id)),
            changes,
        )
        .await
    }

    pub async fn delete_competition_experience(
        &self,
        mentor_profile_id: &str,
        competition_id: &str,
    ) -> Result<Vec<CompetitionEntry>, ClientError> {
        self.delete(&mentor_path(
            mentor_profile_id,
            "competitions",
            Some(competition_id),
        ))
        .await
    }

    // ─── Open Source, Badges, Days Off ───────────────────────

    pub async fn add_open_source_achievement(
        &self,
        mentor_profile_id: &str,
        achievement: &NewOpenSourceAchievement,
    ) -> Result<OpenSourceAchievement, ClientError> {
        self.post(&mentor_path(mentor_profile_id, "opensource", None), achievement)
            .await
    }

    pub async fn get_open_source_achievements(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<OpenSourceAchievement>, ClientError> {
        self.get(&mentor_path(mentor_profile_id, "opensource", None))
            .await
    }

    pub async fn add_mentor_badge(
        &self,
        mentor_profile_id: &str,
        badge: &NewBadge,
    ) -> Result<Badge, ClientError> {
        self.post(&mentor_path(mentor_profile_id, "badges", None), badge)
            .await
    }

    pub async fn get_mentor_badges(&self, mentor_profile_id: &str) -> Result<Vec<Badge>, ClientError> {
        self.get(&mentor_path(mentor_profile_id, "badges", None))
            .await
    }

    pub async fn add_unavailable_date(
        &self,
        mentor_profile_id: &str,
        day: &NewUnavailableDate,
    ) -> Result<UnavailableDate, ClientError> {
        self.post(&mentor_path(mentor_profile_id, "unavailable", None), day)
            .await
    }

    /// Blocked-out days in calendar order.
    pub async fn get_unavailable_dates(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<UnavailableDate>, ClientError> {
        self.get(&mentor_path(mentor_profile_id, "unavailable", None))
            .await
    }
}
