// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display-ready rows for the dashboard and mentor list pages.

use crate::models::{MentorProfile, Session, User};
use chrono::{Duration, NaiveDate, NaiveTime};

pub const NO_MENTORS_MESSAGE: &str = "No mentors found";

/// "Today, 15:00", "Tomorrow, 15:00" or "Friday, 15:00".
pub fn format_session_time(date: NaiveDate, start: NaiveTime, today: NaiveDate) -> String {
    let day = if date == today {
        "Today".to_string()
    } else if Some(date) == today.checked_add_signed(Duration::days(1)) {
        "Tomorrow".to_string()
    } else {
        date.format("%A").to_string()
    };
    format!("{}, {}", day, start.format("%H:%M"))
}

/// One headline number on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: u32,
}

/// GitHub numbers plus total sessions, as on the mentor dashboard.
pub fn mentor_metrics(user: &User, profile: Option<&MentorProfile>) -> Vec<Metric> {
    let github = user.github_data.clone().unwrap_or_default();
    vec![
        Metric {
            label: "Contributions",
            value: github.contributions_collection.total_contributions,
        },
        Metric {
            label: "Pull Requests",
            value: github.contributions_collection.total_pull_request_contributions,
        },
        Metric {
            label: "Total Sessions",
            value: profile.map(|p| p.total_sessions).unwrap_or(0),
        },
        Metric {
            label: "Repositories",
            value: github.summary.total_repositories,
        },
    ]
}

pub fn contributor_metrics(user: &User) -> Vec<Metric> {
    let github = user.github_data.clone().unwrap_or_default();
    vec![
        Metric {
            label: "Contributions",
            value: github.contributions_collection.total_contributions,
        },
        Metric {
            label: "Pull Requests",
            value: github.contributions_collection.total_pull_request_contributions,
        },
        Metric {
            label: "Issues",
            value: github.contributions_collection.total_issue_contributions,
        },
        Metric {
            label: "Repositories",
            value: github.summary.total_repositories,
        },
    ]
}

/// An upcoming meeting as listed on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRow {
    pub session_id: String,
    /// The other participant
    pub with: String,
    pub topic: String,
    pub time: String,
}

impl MeetingRow {
    pub fn new(session: &Session, counterpart: Option<&User>, today: NaiveDate) -> Self {
        let topic = session.topic.trim();
        Self {
            session_id: session.id.clone(),
            with: counterpart
                .map(|u| u.label().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            topic: if topic.is_empty() {
                "General Session".to_string()
            } else {
                topic.to_string()
            },
            time: format_session_time(session.scheduled_date, session.scheduled_start_time, today),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MentorRow {
    pub profile_id: String,
    pub user_id: String,
    pub headline: String,
    /// One decimal, "0.0" for unrated
    pub rating: String,
    pub hourly_rate: String,
    pub skills: Vec<String>,
    pub matching_skills: Vec<String>,
}

/// Search results ready to render, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct MentorListView {
    pub rows: Vec<MentorRow>,
    /// Shown instead of the list when there are no rows.
    pub empty_message: Option<&'static str>,
}

impl MentorListView {
    pub fn from_mentors(mentors: &[MentorProfile]) -> Self {
        let rows: Vec<MentorRow> = mentors
            .iter()
            .map(|m| MentorRow {
                profile_id: m.id.clone(),
                user_id: m.user_id.clone(),
                headline: m.headline.clone(),
                rating: format!("{:.1}", m.overall_rating),
                hourly_rate: format!("${}/hr", m.hourly_rate),
                skills: m.skills.iter().map(|s| s.name.clone()).collect(),
                matching_skills: m.matching_skills.clone(),
            })
            .collect();

        Self {
            empty_message: rows.is_empty().then_some(NO_MENTORS_MESSAGE),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
