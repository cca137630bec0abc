// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Session reviews and mentor testimonials.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A contributor's rating of a completed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub session_id: String,
    /// Mentor's user ID
    pub mentor_id: String,
    pub reviewer_id: String,
    /// 1..=5
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: String,
}

/// Free-form praise shown on a mentor's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub mentor_profile_id: String,
    pub author_id: String,
    pub content: String,
    pub rating: Option<u8>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: String,
}

/// Mean rating rounded to two decimals, 0.0 for no reviews.
pub fn average_rating<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> f64 {
    let (sum, count) = reviews
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), r| (sum + r.rating as u32, count + 1));
    if count == 0 {
        return 0.0;
    }
    (sum as f64 / count as f64 * 100.0).round() / 100.0
}
