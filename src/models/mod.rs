// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod background;
pub mod mentor;
pub mod review;
pub mod session;
pub mod user;

pub use background::{
    Badge, Certification, CompetitionEntry, OpenSourceAchievement, UnavailableDate,
    WorkExperience,
};
pub use mentor::{AvailabilitySlot, ContributorProfile, MentorProfile, MentorSkill, SkillLevel};
pub use review::{Review, Testimonial};
pub use session::{
    Participant, Session, SessionOutcome, SessionStats, SessionStatus, StatusChange,
    TransitionError,
};
pub use user::{GithubData, Role, User};
