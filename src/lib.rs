// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! MentorHub: a mentorship marketplace backend and typed client
//!
//! This crate provides the REST API that pairs contributors with mentors
//! (GitHub login, profiles, session booking, mentor search) together with
//! the client the dashboards use to talk to it.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Store;
use services::GithubClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Store,
    pub github: GithubClient,
}

impl AppState {
    /// State backed by a fresh store and the configured GitHub app.
    pub fn new(config: Config) -> Self {
        let github = GithubClient::new(
            config.github_client_id.clone(),
            config.github_client_secret.clone(),
        );
        Self {
            config,
            db: Store::new(),
            github,
        }
    }
}
