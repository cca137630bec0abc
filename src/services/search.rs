// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor matching and ranking.
//!
//! The API layer passes a snapshot of mentor profiles; everything here is
//! pure so ranking is deterministic and testable without the store.

use crate::models::mentor::skill_key;
use crate::models::MentorProfile;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
pub const DEFAULT_TOP_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

/// Filters accepted by `POST /api/search/mentors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct MentorFilters {
    #[serde(default)]
    #[validate(length(max = 25))]
    pub technologies: Vec<String>,
    /// Caller's user ID; their own mentor profile is left out of results.
    pub user_id: Option<String>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub min_rating: Option<f64>,
    #[validate(range(min = 0.0))]
    pub max_hourly_rate: Option<f64>,
    pub limit: Option<u32>,
}

/// Clamp a requested page size to 1..=MAX_LIMIT.
pub fn clamp_limit(requested: Option<u32>, default: u32) -> usize {
    requested.unwrap_or(default).clamp(1, MAX_LIMIT) as usize
}

/// Normalized (trimmed, lowercased, non-empty, deduplicated) technology names.
fn normalize(technologies: &[String]) -> Vec<String> {
    let mut wanted: Vec<String> = technologies
        .iter()
        .map(|t| skill_key(t))
        .filter(|t| !t.is_empty())
        .collect();
    wanted.sort();
    wanted.dedup();
    wanted
}

/// Mentor skill names that match any wanted technology, in the mentor's order.
pub fn matching_skills(profile: &MentorProfile, technologies: &[String]) -> Vec<String> {
    let wanted = normalize(technologies);
    profile
        .skills
        .iter()
        .filter(|skill| wanted.contains(&skill_key(&skill.name)))
        .map(|skill| skill.name.clone())
        .collect()
}

/// Popularity order: rating, then completed sessions, then ID for stability.
fn by_reputation(a: &MentorProfile, b: &MentorProfile) -> Ordering {
    b.overall_rating
        .total_cmp(&a.overall_rating)
        .then_with(|| b.completed_sessions.cmp(&a.completed_sessions))
        .then_with(|| a.id.cmp(&b.id))
}

/// Filter and rank mentors for a search request.
///
/// With technologies given, mentors without a matching skill are dropped and
/// the number of matches is the primary sort key.
pub fn search(mentors: Vec<MentorProfile>, filters: &MentorFilters) -> Vec<MentorProfile> {
    let wanted = normalize(&filters.technologies);
    let limit = clamp_limit(filters.limit, DEFAULT_SEARCH_LIMIT);

    let mut results: Vec<MentorProfile> = mentors
        .into_iter()
        .filter(|m| filters.user_id.as_deref() != Some(m.user_id.as_str()))
        .filter(|m| filters.min_rating.map_or(true, |min| m.overall_rating >= min))
        .filter(|m| filters.max_hourly_rate.map_or(true, |max| m.hourly_rate <= max))
        .filter_map(|mut m| {
            m.matching_skills = matching_skills(&m, &wanted);
            if !wanted.is_empty() && m.matching_skills.is_empty() {
                None
            } else {
                Some(m)
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.matching_skills
            .len()
            .cmp(&a.matching_skills.len())
            .then_with(|| by_reputation(a, b))
    });
    results.truncate(limit);
    results
}

/// Highest-rated mentors, optionally restricted to one technology.
pub fn top_mentors(
    mentors: Vec<MentorProfile>,
    technology: Option<&str>,
    limit: Option<u32>,
) -> Vec<MentorProfile> {
    let technology = technology.map(str::trim).filter(|t| !t.is_empty());
    let limit = clamp_limit(limit, DEFAULT_TOP_LIMIT);

    let mut results: Vec<MentorProfile> = match technology {
        Some(tech) => {
            let wanted = vec![tech.to_string()];
            mentors
                .into_iter()
                .filter_map(|mut m| {
                    m.matching_skills = matching_skills(&m, &wanted);
                    (!m.matching_skills.is_empty()).then_some(m)
                })
                .collect()
        }
        None => mentors,
    };

    results.sort_by(by_reputation);
    results.truncate(limit);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;

    fn mentor(id: &str, rating: f64, completed: u32, skills: &[&str]) -> MentorProfile {
        let mut m = MentorProfile::new(&format!("user-{}", id), id.into(), String::new(), 40.0);
        m.id = id.to_string();
        m.overall_rating = rating;
        m.completed_sessions = completed;
        for skill in skills {
            m.upsert_skill(skill, SkillLevel::Advanced);
        }
        m
    }

    fn ids(mentors: &[MentorProfile]) -> Vec<&str> {
        mentors.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_matching_skills_case_insensitive() {
        let m = mentor("a", 4.0, 0, &["React", "TypeScript", "Node.js"]);
        let wanted = vec!["react".to_string(), " node.js ".to_string(), "Go".to_string()];
        let matches = matching_skills(&m, &wanted);
        assert_eq!(matches, vec!["React", "Node.js"]);
    }

    #[test]
    fn test_search_ranks_by_match_count_then_rating() {
        let mentors = vec![
            mentor("one-match-high", 5.0, 10, &["React"]),
            mentor("two-matches", 3.0, 1, &["React", "TypeScript"]),
            mentor("one-match-low", 4.0, 10, &["TypeScript"]),
            mentor("no-match", 5.0, 99, &["Go"]),
        ];
        let filters = MentorFilters {
            technologies: vec!["React".into(), "TypeScript".into()],
            ..Default::default()
        };

        let results = search(mentors, &filters);

        assert_eq!(
            ids(&results),
            vec!["two-matches", "one-match-high", "one-match-low"]
        );
        assert_eq!(results[0].matching_skills, vec!["React", "TypeScript"]);
    }

    #[test]
    fn test_search_ties_broken_by_sessions_then_id() {
        let mentors = vec![
            mentor("b", 4.5, 3, &["Rust"]),
            mentor("a", 4.5, 3, &["Rust"]),
            mentor("c", 4.5, 7, &["Rust"]),
        ];
        let filters = MentorFilters {
            technologies: vec!["rust".into()],
            ..Default::default()
        };
        assert_eq!(ids(&search(mentors, &filters)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_search_without_technologies_returns_everyone() {
        let mentors = vec![mentor("a", 1.0, 0, &[]), mentor("b", 2.0, 0, &["Go"])];
        let results = search(mentors, &MentorFilters::default());
        assert_eq!(ids(&results), vec!["b", "a"]);
        assert!(results.iter().all(|m| m.matching_skills.is_empty()));
    }

    #[test]
    fn test_search_excludes_caller_and_applies_filters() {
        let mut cheap = mentor("cheap", 4.0, 0, &["Rust"]);
        cheap.hourly_rate = 20.0;
        let mut pricey = mentor("pricey", 5.0, 0, &["Rust"]);
        pricey.hourly_rate = 200.0;
        let low = mentor("low", 2.0, 0, &["Rust"]);
        let me = mentor("me", 5.0, 0, &["Rust"]);

        let filters = MentorFilters {
            technologies: vec!["Rust".into()],
            user_id: Some("user-me".into()),
            min_rating: Some(3.0),
            max_hourly_rate: Some(100.0),
            limit: None,
        };
        let results = search(vec![cheap, pricey, low, me], &filters);
        assert_eq!(ids(&results), vec!["cheap"]);
    }

    #[test]
    fn test_top_mentors_by_technology_and_limit() {
        let mentors = vec![
            mentor("a", 3.0, 0, &["React"]),
            mentor("b", 5.0, 0, &["React"]),
            mentor("c", 4.0, 0, &["Vue"]),
            mentor("d", 4.0, 0, &["react"]),
        ];

        let all = top_mentors(mentors.clone(), None, Some(2));
        assert_eq!(ids(&all), vec!["b", "c"]);

        let react = top_mentors(mentors, Some("React"), None);
        assert_eq!(ids(&react), vec!["b", "d", "a"]);
        assert_eq!(react[1].matching_skills, vec!["react"]);
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 10), 10);
        assert_eq!(clamp_limit(Some(0), 10), 1);
        assert_eq!(clamp_limit(Some(500), 10), 50);
    }
}
