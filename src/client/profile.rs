// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile and GitHub metrics resource functions.

use super::{ApiClient, ClientError};
use crate::models::user::ContributionsCollection;
use crate::models::{ContributorProfile, GithubData, MentorProfile, User};
use crate::routes::github::SyncContributionsRequest;
use crate::routes::profile::{
    CompleteProfile, CreateMentorProfileRequest, UpdateContributorProfileRequest,
    UpdateMentorProfileRequest, UpdateUserRequest,
};
use urlencoding::encode;

impl ApiClient {
    pub async fn get_complete_profile(&self, user_id: &str) -> Result<CompleteProfile, ClientError> {
        self.get(&format!("/api/profile/complete/{}", encode(user_id)))
            .await
    }

    pub async fn update_user_profile(
        &self,
        user_id: &str,
        update: &UpdateUserRequest,
    ) -> Result<User, ClientError> {
        self.patch(&format!("/api/profile/user/{}", encode(user_id)), update)
            .await
    }

    pub async fn create_mentor_profile(
        &self,
        user_id: &str,
        profile: &CreateMentorProfileRequest,
    ) -> Result<MentorProfile, ClientError> {
        self.post(&format!("/api/profile/mentor/{}", encode(user_id)), profile)
            .await
    }

    pub async fn update_mentor_profile(
        &self,
        user_id: &str,
        update: &UpdateMentorProfileRequest,
    ) -> Result<MentorProfile, ClientError> {
        self.patch(&format!("/api/profile/mentor/{}", encode(user_id)), update)
            .await
    }

    pub async fn update_contributor_profile(
        &self,
        user_id: &str,
        update: &UpdateContributorProfileRequest,
    ) -> Result<ContributorProfile, ClientError> {
        self.patch(
            &format!("/api/profile/contributor/{}", encode(user_id)),
            update,
        )
        .await
    }

    pub async fn get_github_profile(&self, user_id: &str) -> Result<GithubData, ClientError> {
        self.get(&format!("/api/github/profile/{}", encode(user_id)))
            .await
    }

    pub async fn sync_github_contributions(
        &self,
        user_id: &str,
        contributions: ContributionsCollection,
    ) -> Result<GithubData, ClientError> {
        self.post(
            "/api/github/sync-contributions",
            &SyncContributionsRequest {
                user_id: user_id.to_string(),
                contributions,
            },
        )
        .await
    }
}
