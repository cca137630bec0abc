// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mentoring session model and its status lifecycle.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::clock_time;

/// Session status. Terminal states have no outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

/// Which side of a session a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Participant {
    Mentor,
    Contributor,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        SessionStatus::Pending,
        SessionStatus::Confirmed,
        SessionStatus::Completed,
        SessionStatus::Cancelled,
        SessionStatus::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::NoShow => "no_show",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::NoShow
        )
    }

    /// The transition table. Moving to the current status is not a transition.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, NoShow)
        )
    }

    /// Whether `who` may perform the (legal) move from `self` to `next`.
    pub fn permits(&self, next: SessionStatus, who: Participant) -> bool {
        use SessionStatus::*;
        match (self, next) {
            (Pending, Confirmed) | (Confirmed, NoShow) => who == Participant::Mentor,
            (Pending, Cancelled) | (Confirmed, Completed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected status change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot change session status from {from} to {to}")]
    Illegal {
        from: SessionStatus,
        to: SessionStatus,
    },

    #[error("Only the mentor can change session status from {from} to {to}")]
    NotPermitted {
        from: SessionStatus,
        to: SessionStatus,
    },
}

/// Result of applying a status request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    /// Requested status equals the current one.
    Unchanged,
    Changed {
        from: SessionStatus,
        to: SessionStatus,
    },
}

/// A scheduled mentoring meeting between a mentor and a contributor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    /// Mentor's user ID
    pub mentor_id: String,
    /// Contributor's (student's) user ID
    pub contributor_id: String,
    pub topic: String,
    pub description: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub scheduled_date: NaiveDate,
    #[serde(with = "clock_time")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub scheduled_start_time: NaiveTime,
    #[serde(with = "clock_time")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub scheduled_end_time: NaiveTime,
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub status: SessionStatus,
    pub meeting_link: Option<String>,
    pub outcome: Option<SessionOutcome>,
    pub created_at: String,
    pub updated_at: String,
}

impl Session {
    /// Which side `user_id` is on, if either.
    pub fn participant(&self, user_id: &str) -> Option<Participant> {
        if self.mentor_id == user_id {
            Some(Participant::Mentor)
        } else if self.contributor_id == user_id {
            Some(Participant::Contributor)
        } else {
            None
        }
    }

    /// Apply a requested status on behalf of `who`.
    pub fn apply_status(
        &mut self,
        next: SessionStatus,
        who: Participant,
        now: &str,
    ) -> Result<StatusChange, TransitionError> {
        let from = self.status;
        if from == next {
            return Ok(StatusChange::Unchanged);
        }
        if !from.can_transition_to(next) {
            return Err(TransitionError::Illegal { from, to: next });
        }
        if !from.permits(next, who) {
            return Err(TransitionError::NotPermitted { from, to: next });
        }

        self.status = next;
        self.updated_at = now.to_string();
        Ok(StatusChange::Changed { from, to: next })
    }

    /// Scheduled length, from the stored duration or the time window.
    pub fn planned_minutes(&self) -> u32 {
        self.duration_minutes.unwrap_or_else(|| {
            minutes_between(self.scheduled_start_time, self.scheduled_end_time)
        })
    }
}

/// Whole minutes from `start` to `end`; zero when `end` is not after `start`.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> u32 {
    let minutes = (end - start).num_minutes();
    u32::try_from(minutes).unwrap_or(0)
}

/// What came out of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutcome {
    pub summary: String,
    pub actual_duration_minutes: Option<u32>,
    #[serde(default)]
    pub follow_up_needed: bool,
    pub recorded_at: String,
}

/// Aggregate session counts for a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total: u32,
    pub pending: u32,
    pub confirmed: u32,
    pub completed: u32,
    pub cancelled: u32,
    pub no_show: u32,
    pub total_minutes_completed: u32,
}

impl SessionStats {
    pub fn tally<'a>(sessions: impl IntoIterator<Item = &'a Session>) -> Self {
        let mut stats = SessionStats::default();
        for session in sessions {
            stats.total += 1;
            match session.status {
                SessionStatus::Pending => stats.pending += 1,
                SessionStatus::Confirmed => stats.confirmed += 1,
                SessionStatus::Completed => {
                    stats.completed += 1;
                    let minutes = session
                        .outcome
                        .as_ref()
                        .and_then(|o| o.actual_duration_minutes)
                        .unwrap_or_else(|| session.planned_minutes());
                    stats.total_minutes_completed += minutes;
                }
                SessionStatus::Cancelled => stats.cancelled += 1,
                SessionStatus::NoShow => stats.no_show += 1,
            }
        }
        stats
    }
}
