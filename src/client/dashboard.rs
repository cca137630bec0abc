// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard data loading.
//!
//! A dashboard first identifies the user (failure is returned to the caller),
//! checks the role, then issues its reads concurrently. Those reads are
//! optional: a failure is logged and the piece renders as absent.

use super::feed::{Feed, HotPost, Post, DEFAULT_HOT_LIMIT, DEFAULT_POST_LIMIT};
use super::views::{contributor_metrics, mentor_metrics, MeetingRow, Metric};
use super::{route_for_role, ApiClient, ClientError};
use crate::models::{
    ContributorProfile, MentorProfile, Participant, Role, Session, SessionStats, SessionStatus,
    User,
};
use chrono::NaiveDate;
use futures_util::future::join_all;

/// Meetings shown on a dashboard.
pub const UPCOMING_LIMIT: usize = 3;

/// Outcome of loading a role-specific page.
#[derive(Debug)]
pub enum DashboardLoad<T> {
    Ready(T),
    /// The user belongs on another page.
    Redirect(&'static str),
}

fn optional<T>(what: &str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(what, error = %e, "Dashboard data unavailable");
            None
        }
    }
}

/// Send users with a different role to their own dashboard.
fn role_gate(user: &User, expected: Role) -> Option<&'static str> {
    match user.role {
        Some(role) if role != expected => Some(route_for_role(Some(role))),
        _ => None,
    }
}

/// Look up the other participant of each session concurrently.
async fn meeting_rows(
    client: &ApiClient,
    sessions: &[Session],
    side: Participant,
    today: NaiveDate,
) -> Vec<MeetingRow> {
    let lookups = sessions.iter().map(|s| {
        let other = match side {
            Participant::Mentor => s.contributor_id.as_str(),
            Participant::Contributor => s.mentor_id.as_str(),
        };
        client.get_complete_profile(other)
    });
    let counterparts = join_all(lookups).await;

    sessions
        .iter()
        .zip(counterparts)
        .map(|(session, profile)| {
            let user = optional("counterpart", profile).map(|p| p.user);
            MeetingRow::new(session, user.as_ref(), today)
        })
        .collect()
}

#[derive(Debug)]
pub struct MentorDashboard {
    pub user: User,
    pub mentor_profile: Option<MentorProfile>,
    pub upcoming: Vec<MeetingRow>,
    pub stats: Option<SessionStats>,
    pub metrics: Vec<Metric>,
}

impl MentorDashboard {
    pub async fn load(
        client: &ApiClient,
        today: NaiveDate,
    ) -> Result<DashboardLoad<Self>, ClientError> {
        let user = client.get_me().await?;
        if let Some(route) = role_gate(&user, Role::Mentor) {
            return Ok(DashboardLoad::Redirect(route));
        }

        let (profile, sessions, stats) = tokio::join!(
            client.get_complete_profile(&user.id),
            client.get_user_sessions(
                &user.id,
                Some(Participant::Mentor),
                Some(SessionStatus::Confirmed)
            ),
            client.get_session_stats(&user.id, Participant::Mentor),
        );

        let mentor_profile = optional("profile", profile).and_then(|p| p.mentor_profile);
        let mut sessions = optional("sessions", sessions).unwrap_or_default();
        sessions.truncate(UPCOMING_LIMIT);
        let upcoming = meeting_rows(client, &sessions, Participant::Mentor, today).await;

        Ok(DashboardLoad::Ready(Self {
            metrics: mentor_metrics(&user, mentor_profile.as_ref()),
            user,
            mentor_profile,
            upcoming,
            stats: optional("stats", stats),
        }))
    }
}

#[derive(Debug)]
pub struct StudentDashboard {
    pub user: User,
    pub contributor_profile: Option<ContributorProfile>,
    pub upcoming: Vec<MeetingRow>,
    pub stats: Option<SessionStats>,
    pub metrics: Vec<Metric>,
    pub posts: Vec<Post>,
    pub hot_posts: Vec<HotPost>,
}

impl StudentDashboard {
    pub async fn load(
        client: &ApiClient,
        feed: &Feed,
        today: NaiveDate,
    ) -> Result<DashboardLoad<Self>, ClientError> {
        let user = client.get_me().await?;
        if let Some(route) = role_gate(&user, Role::Student) {
            return Ok(DashboardLoad::Redirect(route));
        }

        let (profile, sessions, stats) = tokio::join!(
            client.get_complete_profile(&user.id),
            client.get_user_sessions(
                &user.id,
                Some(Participant::Contributor),
                Some(SessionStatus::Confirmed)
            ),
            client.get_session_stats(&user.id, Participant::Contributor),
        );

        let mut sessions = optional("sessions", sessions).unwrap_or_default();
        sessions.truncate(UPCOMING_LIMIT);
        let upcoming = meeting_rows(client, &sessions, Participant::Contributor, today).await;

        Ok(DashboardLoad::Ready(Self {
            metrics: contributor_metrics(&user),
            contributor_profile: optional("profile", profile).and_then(|p| p.contributor_profile),
            user,
            upcoming,
            stats: optional("stats", stats),
            posts: feed.posts(DEFAULT_POST_LIMIT).to_vec(),
            hot_posts: feed.hot_posts(DEFAULT_HOT_LIMIT).to_vec(),
        }))
    }
}
