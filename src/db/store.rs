// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles, roles, GitHub data)
//! - Mentor and contributor profiles
//! - Sessions (bookings and their status)
//! - Reviews and testimonials
//!
//! Each collection is a `DashMap`. Closures passed to the `update_*` methods
//! run under the entry's write lock, so a read-check-write inside one of them
//! is atomic with respect to other requests.

use crate::error::AppError;
use crate::models::{ContributorProfile, MentorProfile, Review, Session, Testimonial, User};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Shared handle to the collections. Cloning is cheap.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Collections>,
}

#[derive(Default)]
struct Collections {
    users: DashMap<String, User>,
    /// GitHub login -> user ID
    usernames: DashMap<String, String>,
    mentor_profiles: DashMap<String, MentorProfile>,
    /// User ID -> mentor profile ID
    mentor_by_user: DashMap<String, String>,
    /// Keyed by user ID (one-to-one)
    contributor_profiles: DashMap<String, ContributorProfile>,
    sessions: DashMap<String, Session>,
    /// Keyed by "{session_id}:{reviewer_id}" so a reviewer rates a session once
    reviews: DashMap<String, Review>,
    testimonials: DashMap<String, Testimonial>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.inner.users.get(user_id).map(|u| u.clone())
    }

    /// Get a user by GitHub login.
    pub fn find_user_by_username(&self, username: &str) -> Option<User> {
        let user_id = self.inner.usernames.get(username)?.clone();
        self.get_user(&user_id)
    }

    /// Look up the user for a GitHub login, inserting `create()` if the login
    /// is unclaimed.
    ///
    /// The login is claimed under its `usernames` entry lock, so concurrent
    /// callers agree on one user. Returns the user and whether it was created.
    pub fn get_or_insert_user_by_username<F>(&self, username: &str, create: F) -> (User, bool)
    where
        F: FnOnce() -> User,
    {
        match self.inner.usernames.entry(username.to_string()) {
            Entry::Occupied(mut slot) => {
                if let Some(user) = self.get_user(slot.get()) {
                    return (user, false);
                }
                let user = create();
                self.inner.users.insert(user.id.clone(), user.clone());
                slot.insert(user.id.clone());
                (user, true)
            }
            Entry::Vacant(slot) => {
                let user = create();
                self.inner.users.insert(user.id.clone(), user.clone());
                slot.insert(user.id.clone());
                (user, true)
            }
        }
    }

    /// Modify a user in place and return the updated copy.
    pub fn update_user<F>(&self, user_id: &str, f: F) -> Result<User, AppError>
    where
        F: FnOnce(&mut User) -> Result<(), AppError>,
    {
        let mut user = self
            .inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        f(&mut user)?;
        Ok(user.clone())
    }

    // ─── Mentor Profile Operations ───────────────────────────────

    pub fn get_mentor_profile(&self, profile_id: &str) -> Option<MentorProfile> {
        self.inner
            .mentor_profiles
            .get(profile_id)
            .map(|p| p.clone())
    }

    pub fn get_mentor_profile_by_user(&self, user_id: &str) -> Option<MentorProfile> {
        let profile_id = self.inner.mentor_by_user.get(user_id)?.clone();
        self.get_mentor_profile(&profile_id)
    }

    /// Insert a new mentor profile. Fails if the user already has one.
    pub fn insert_mentor_profile(&self, profile: &MentorProfile) -> Result<(), AppError> {
        match self.inner.mentor_by_user.entry(profile.user_id.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(
                "Mentor profile already exists".to_string(),
            )),
            Entry::Vacant(slot) => {
                self.inner
                    .mentor_profiles
                    .insert(profile.id.clone(), profile.clone());
                slot.insert(profile.id.clone());
                Ok(())
            }
        }
    }

    /// Modify a mentor profile in place and return the updated copy.
    pub fn update_mentor_profile<F>(&self, profile_id: &str, f: F) -> Result<MentorProfile, AppError>
    where
        F: FnOnce(&mut MentorProfile) -> Result<(), AppError>,
    {
        let mut profile = self
            .inner
            .mentor_profiles
            .get_mut(profile_id)
            .ok_or_else(|| AppError::NotFound("Mentor profile not found".to_string()))?;
        f(&mut profile)?;
        Ok(profile.clone())
    }

    /// Modify the mentor profile owned by `user_id`, if there is one.
    ///
    /// Returns `Ok(None)` when the user has no mentor profile.
    pub fn update_mentor_profile_by_user<F>(
        &self,
        user_id: &str,
        f: F,
    ) -> Result<Option<MentorProfile>, AppError>
    where
        F: FnOnce(&mut MentorProfile) -> Result<(), AppError>,
    {
        let Some(profile_id) = self.inner.mentor_by_user.get(user_id).map(|id| id.clone()) else {
            return Ok(None);
        };
        self.update_mentor_profile(&profile_id, f).map(Some)
    }

    /// Snapshot of every mentor profile (unordered).
    pub fn list_mentor_profiles(&self) -> Vec<MentorProfile> {
        self.inner
            .mentor_profiles
            .iter()
            .map(|p| p.value().clone())
            .collect()
    }

    // ─── Contributor Profile Operations ──────────────────────────

    pub fn get_contributor_profile(&self, user_id: &str) -> Option<ContributorProfile> {
        self.inner
            .contributor_profiles
            .get(user_id)
            .map(|p| p.clone())
    }

    /// Create the contributor profile if missing, then apply `f`.
    pub fn upsert_contributor_profile<F>(&self, user_id: &str, f: F) -> ContributorProfile
    where
        F: FnOnce(&mut ContributorProfile),
    {
        let mut profile = self
            .inner
            .contributor_profiles
            .entry(user_id.to_string())
            .or_insert_with(|| ContributorProfile {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                interests: Vec::new(),
                goals: None,
                experience_level: None,
            });
        f(&mut profile);
        profile.clone()
    }

    // ─── Session Operations ──────────────────────────────────────

    pub fn get_session(&self, session_id: &str) -> Option<Session> {
        self.inner.sessions.get(session_id).map(|s| s.clone())
    }

    pub fn insert_session(&self, session: &Session) {
        self.inner
            .sessions
            .insert(session.id.clone(), session.clone());
    }

    /// Run `f` against a session under its entry lock.
    ///
    /// Returns the updated session together with whatever `f` produced.
    pub fn update_session<F, R>(&self, session_id: &str, f: F) -> Result<(Session, R), AppError>
    where
        F: FnOnce(&mut Session) -> Result<R, AppError>,
    {
        let mut session = self
            .inner
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
        let result = f(&mut session)?;
        Ok((session.clone(), result))
    }

    /// Sessions matching `predicate`, ordered by scheduled date then start time.
    pub fn list_sessions<P>(&self, predicate: P) -> Vec<Session>
    where
        P: Fn(&Session) -> bool,
    {
        let mut sessions: Vec<Session> = self
            .inner
            .sessions
            .iter()
            .filter(|s| predicate(s.value()))
            .map(|s| s.value().clone())
            .collect();
        sessions.sort_by(|a, b| {
            a.scheduled_date
                .cmp(&b.scheduled_date)
                .then_with(|| a.scheduled_start_time.cmp(&b.scheduled_start_time))
                .then_with(|| a.id.cmp(&b.id))
        });
        sessions
    }

    // ─── Review Operations ───────────────────────────────────────

    /// Insert a review. A reviewer can rate a given session only once.
    pub fn insert_review(&self, review: &Review) -> Result<(), AppError> {
        let key = format!("{}:{}", review.session_id, review.reviewer_id);
        match self.inner.reviews.entry(key) {
            Entry::Occupied(_) => Err(AppError::Conflict(
                "You have already reviewed this session".to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(review.clone());
                Ok(())
            }
        }
    }

    /// Reviews matching `predicate`, newest first.
    pub fn list_reviews<P>(&self, predicate: P) -> Vec<Review>
    where
        P: Fn(&Review) -> bool,
    {
        let mut reviews: Vec<Review> = self
            .inner
            .reviews
            .iter()
            .filter(|r| predicate(r.value()))
            .map(|r| r.value().clone())
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        reviews
    }

    // ─── Testimonial Operations ──────────────────────────────────

    pub fn insert_testimonial(&self, testimonial: &Testimonial) {
        self.inner
            .testimonials
            .insert(testimonial.id.clone(), testimonial.clone());
    }

    pub fn get_testimonial(&self, testimonial_id: &str) -> Option<Testimonial> {
        self.inner
            .testimonials
            .get(testimonial_id)
            .map(|t| t.clone())
    }

    pub fn update_testimonial<F>(&self, testimonial_id: &str, f: F) -> Result<Testimonial, AppError>
    where
        F: FnOnce(&mut Testimonial),
    {
        let mut testimonial = self
            .inner
            .testimonials
            .get_mut(testimonial_id)
            .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;
        f(&mut testimonial);
        Ok(testimonial.clone())
    }

    /// Testimonials for a mentor profile, newest first.
    pub fn list_testimonials(&self, mentor_profile_id: &str, featured_only: bool) -> Vec<Testimonial> {
        let mut testimonials: Vec<Testimonial> = self
            .inner
            .testimonials
            .iter()
            .filter(|t| t.mentor_profile_id == mentor_profile_id && (!featured_only || t.featured))
            .map(|t| t.value().clone())
            .collect();
        testimonials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        testimonials
    }
}
