// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session resource functions.

use super::{with_query, ApiClient, ClientError};
use crate::models::{Participant, Review, Session, SessionStats, SessionStatus};
use crate::routes::sessions::{CreateReviewRequest, CreateSessionRequest, UpdateOutcomeRequest};
use serde::{Deserialize, Serialize};
use urlencoding::encode;

/// Server acknowledgement of a status change.
///
/// Only `status` is required so minimal acknowledgements decode too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(default)]
    pub id: Option<String>,
    pub status: SessionStatus,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize)]
struct StatusBody {
    status: SessionStatus,
}

fn side_param(side: Participant) -> &'static str {
    match side {
        Participant::Mentor => "mentor",
        Participant::Contributor => "contributor",
    }
}

#[derive(Serialize)]
struct UserSessionsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<SessionStatus>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MentorReviewsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    min_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
}

/// `/api/sessions/user/{id}` with only the filters that were given.
pub fn user_sessions_path(
    user_id: &str,
    role: Option<Participant>,
    status: Option<SessionStatus>,
) -> Result<String, ClientError> {
    with_query(
        format!("/api/sessions/user/{}", encode(user_id)),
        &UserSessionsQuery {
            role: role.map(side_param),
            status,
        },
    )
}

/// `/api/sessions/mentor/{id}/reviews` with optional filters.
pub fn mentor_reviews_path(
    mentor_id: &str,
    min_rating: Option<u8>,
    limit: Option<u32>,
) -> Result<String, ClientError> {
    with_query(
        format!("/api/sessions/mentor/{}/reviews", encode(mentor_id)),
        &MentorReviewsQuery { min_rating, limit },
    )
}

impl ApiClient {
    pub async fn create_session(&self, request: &CreateSessionRequest) -> Result<Session, ClientError> {
        self.post("/api/sessions", request).await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Session, ClientError> {
        self.get(&format!("/api/sessions/{}", encode(session_id)))
            .await
    }

    pub async fn get_user_sessions(
        &self,
        user_id: &str,
        role: Option<Participant>,
        status: Option<SessionStatus>,
    ) -> Result<Vec<Session>, ClientError> {
        self.get(&user_sessions_path(user_id, role, status)?).await
    }

    /// Request a status change. Callers refetch to see side effects.
    pub async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<StatusUpdate, ClientError> {
        self.patch(
            &format!("/api/sessions/{}/status", encode(session_id)),
            &StatusBody { status },
        )
        .await
    }

    pub async fn update_session_outcome(
        &self,
        session_id: &str,
        outcome: &UpdateOutcomeRequest,
    ) -> Result<Session, ClientError> {
        self.patch(
            &format!("/api/sessions/{}/outcome", encode(session_id)),
            outcome,
        )
        .await
    }

    pub async fn get_session_stats(
        &self,
        user_id: &str,
        role: Participant,
    ) -> Result<SessionStats, ClientError> {
        self.get(&format!(
            "/api/sessions/stats/{}?role={}",
            encode(user_id),
            side_param(role)
        ))
        .await
    }

    pub async fn create_session_review(
        &self,
        session_id: &str,
        review: &CreateReviewRequest,
    ) -> Result<Review, ClientError> {
        self.post(
            &format!("/api/sessions/{}/reviews", encode(session_id)),
            review,
        )
        .await
    }

    pub async fn get_session_reviews(&self, session_id: &str) -> Result<Vec<Review>, ClientError> {
        self.get(&format!("/api/sessions/{}/reviews", encode(session_id)))
            .await
    }

    pub async fn get_mentor_reviews(
        &self,
        mentor_id: &str,
        min_rating: Option<u8>,
        limit: Option<u32>,
    ) -> Result<Vec<Review>, ClientError> {
        self.get(&mentor_reviews_path(mentor_id, min_rating, limit)?)
            .await
    }
}
