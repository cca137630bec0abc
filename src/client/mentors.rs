// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor search, mentor details and testimonials.

use super::{with_query, ApiClient, ClientError};
use crate::models::{AvailabilitySlot, MentorProfile, MentorSkill, Testimonial};
use crate::routes::mentor::{AddSkillsRequest, MentorDetails, SetAvailabilityRequest};
use crate::routes::profile::NewSkill;
use crate::routes::search::MentorsResponse;
use crate::routes::testimonials::{CreateTestimonialRequest, FeaturedRequest};
use crate::services::search::{MentorFilters, DEFAULT_TOP_LIMIT};
use serde::Serialize;
use urlencoding::encode;

#[derive(Serialize)]
struct TopMentorsQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    technology: Option<&'a str>,
    limit: u32,
}

/// `/api/search/top-mentors` query string; `limit` is always sent.
pub fn top_mentors_path(technology: Option<&str>, limit: Option<u32>) -> Result<String, ClientError> {
    with_query(
        "/api/search/top-mentors".to_string(),
        &TopMentorsQuery {
            technology: technology.map(str::trim).filter(|t| !t.is_empty()),
            limit: limit.unwrap_or(DEFAULT_TOP_LIMIT),
        },
    )
}

impl ApiClient {
    /// Ranked mentors for a filter, in server order.
    pub async fn search_mentors(
        &self,
        filters: &MentorFilters,
    ) -> Result<Vec<MentorProfile>, ClientError> {
        let response: MentorsResponse = self.post("/api/search/mentors", filters).await?;
        Ok(response.mentors)
    }

    pub async fn get_top_mentors(
        &self,
        technology: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<MentorProfile>, ClientError> {
        let response: MentorsResponse = self.get(&top_mentors_path(technology, limit)?).await?;
        Ok(response.mentors)
    }

    pub async fn add_mentor_skills(
        &self,
        mentor_profile_id: &str,
        skills: Vec<NewSkill>,
    ) -> Result<Vec<MentorSkill>, ClientError> {
        self.post(
            &format!("/api/mentor/{}/skills", encode(mentor_profile_id)),
            &AddSkillsRequest { skills },
        )
        .await
    }

    pub async fn get_mentor_skills(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<MentorSkill>, ClientError> {
        self.get(&format!("/api/mentor/{}/skills", encode(mentor_profile_id)))
            .await
    }

    pub async fn delete_mentor_skill(
        &self,
        mentor_profile_id: &str,
        skill_id: &str,
    ) -> Result<Vec<MentorSkill>, ClientError> {
        self.delete(&format!(
            "/api/mentor/{}/skills/{}",
            encode(mentor_profile_id),
            encode(skill_id)
        ))
        .await
    }

    /// Replace the weekly schedule.
    pub async fn set_mentor_availability(
        &self,
        mentor_profile_id: &str,
        schedule: Vec<AvailabilitySlot>,
    ) -> Result<Vec<AvailabilitySlot>, ClientError> {
        self.post(
            &format!("/api/mentor/{}/availability", encode(mentor_profile_id)),
            &SetAvailabilityRequest { schedule },
        )
        .await
    }

    pub async fn get_mentor_availability(
        &self,
        mentor_profile_id: &str,
    ) -> Result<Vec<AvailabilitySlot>, ClientError> {
        self.get(&format!(
            "/api/mentor/{}/availability",
            encode(mentor_profile_id)
        ))
        .await
    }

    pub async fn get_complete_mentor_profile(
        &self,
        mentor_profile_id: &str,
    ) -> Result<MentorDetails, ClientError> {
        self.get(&format!("/api/mentor/{}/complete", encode(mentor_profile_id)))
            .await
    }

    pub async fn create_testimonial(
        &self,
        testimonial: &CreateTestimonialRequest,
    ) -> Result<Testimonial, ClientError> {
        self.post("/api/testimonials", testimonial).await
    }

    pub async fn get_mentor_testimonials(
        &self,
        mentor_profile_id: &str,
        featured_only: bool,
    ) -> Result<Vec<Testimonial>, ClientError> {
        let query = if featured_only { "?featured=true" } else { "" };
        self.get(&format!(
            "/api/testimonials/mentor/{}{}",
            encode(mentor_profile_id),
            query
        ))
        .await
    }

    pub async fn set_testimonial_featured(
        &self,
        testimonial_id: &str,
        featured: bool,
    ) -> Result<Testimonial, ClientError> {
        self.patch(
            &format!("/api/testimonials/{}/featured", encode(testimonial_id)),
            &FeaturedRequest { featured },
        )
        .await
    }
}
