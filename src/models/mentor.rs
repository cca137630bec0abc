// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mentor and contributor profiles.

use super::background::{
    Badge, Certification, CompetitionEntry, OpenSourceAchievement, UnavailableDate,
    WorkExperience,
};
use crate::time_utils::clock_time;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A mentor's public profile, one-to-one with a mentor user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    pub id: String,
    pub user_id: String,
    pub headline: String,
    pub bio: String,
    pub hourly_rate: f64,
    /// Mean review rating, 0.0 until the first review
    #[serde(default)]
    pub overall_rating: f64,
    #[serde(default)]
    pub completed_sessions: u32,
    #[serde(default)]
    pub cancelled_sessions: u32,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub skills: Vec<MentorSkill>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub unavailable_dates: Vec<UnavailableDate>,
    #[serde(default)]
    pub expertise_areas: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub experience: Vec<WorkExperience>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub competitions: Vec<CompetitionEntry>,
    #[serde(default)]
    pub open_source: Vec<OpenSourceAchievement>,
    #[serde(default)]
    pub badges: Vec<Badge>,
    /// Skills intersecting a search filter. Only populated in search responses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matching_skills: Vec<String>,
}

impl MentorProfile {
    pub fn new(user_id: &str, headline: String, bio: String, hourly_rate: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            headline,
            bio,
            hourly_rate,
            overall_rating: 0.0,
            completed_sessions: 0,
            cancelled_sessions: 0,
            total_sessions: 0,
            skills: Vec::new(),
            availability: Vec::new(),
            unavailable_dates: Vec::new(),
            expertise_areas: Vec::new(),
            specializations: Vec::new(),
            experience: Vec::new(),
            certifications: Vec::new(),
            competitions: Vec::new(),
            open_source: Vec::new(),
            badges: Vec::new(),
            matching_skills: Vec::new(),
        }
    }

    /// Add a skill, or update the level of an existing one with the same name.
    ///
    /// Returns the stored skill.
    pub fn upsert_skill(&mut self, name: &str, level: SkillLevel) -> MentorSkill {
        let name = name.trim();
        let key = skill_key(name);
        if let Some(existing) = self.skills.iter_mut().find(|s| skill_key(&s.name) == key) {
            existing.level = level;
            return existing.clone();
        }

        let skill = MentorSkill {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            level,
        };
        self.skills.push(skill.clone());
        skill
    }
}

/// Comparison key for skill and technology names: trimmed, Unicode lowercase.
pub fn skill_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MentorSkill {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

/// A weekly recurring availability window (times are "HH:MM" on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    #[serde(with = "clock_time")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub end_time: NaiveTime,
}

/// A contributor's (student's) learning profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ContributorProfile {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub goals: Option<String>,
    pub experience_level: Option<SkillLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_skill_updates_existing_case_insensitively() {
        let mut profile = MentorProfile::new("u1", "Rustacean".into(), String::new(), 50.0);
        let first = profile.upsert_skill("Rust", SkillLevel::Intermediate);
        let second = profile.upsert_skill(" rust ", SkillLevel::Expert);

        assert_eq!(profile.skills.len(), 1);
        assert_eq!(first.id, second.id);
        assert_eq!(profile.skills[0].level, SkillLevel::Expert);
        assert_eq!(profile.skills[0].name, "Rust");
    }

    #[test]
    fn test_upsert_skill_folds_non_ascii_case() {
        let mut profile = MentorProfile::new("u1", "h".into(), String::new(), 50.0);
        profile.upsert_skill("Élixir", SkillLevel::Beginner);
        profile.upsert_skill("élixir", SkillLevel::Advanced);

        assert_eq!(profile.skills.len(), 1);
        assert_eq!(profile.skills[0].level, SkillLevel::Advanced);
    }

    #[test]
    fn test_matching_skills_omitted_when_empty() {
        let profile = MentorProfile::new("u1", "h".into(), "b".into(), 0.0);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("matchingSkills").is_none());
        assert_eq!(json["userId"], "u1");
    }
}
