// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor background shown on the profile page: work history, credentials,
//! competition results, open source work, badges and days off.

use super::mentor::skill_key;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Entries addressed by ID under a mentor profile.
pub trait Identified {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: String,
    pub company: String,
    pub title: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub start_date: NaiveDate,
    /// `None` for the current position
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl WorkExperience {
    pub fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub issued_on: Option<NaiveDate>,
    pub credential_url: Option<String>,
}

/// A hackathon or programming contest result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionEntry {
    pub id: String,
    pub name: String,
    pub year: u16,
    /// e.g. "1st place", "Finalist"
    pub placement: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct OpenSourceAchievement {
    pub id: String,
    pub project: String,
    pub description: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub awarded_at: String,
}

/// A day the mentor takes no bookings, on top of the weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableDate {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub reason: Option<String>,
}

impl Identified for WorkExperience {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Certification {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for CompetitionEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Find an entry by ID for editing.
pub fn find_entry<'a, T: Identified>(entries: &'a mut [T], id: &str) -> Option<&'a mut T> {
    entries.iter_mut().find(|e| e.id() == id)
}

/// Remove an entry by ID. Returns false when nothing matched.
pub fn remove_entry<T: Identified>(entries: &mut Vec<T>, id: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| e.id() != id);
    entries.len() != before
}

/// Append labels (expertise areas, specializations) that are not already
/// present, compared the same way as skill names. Blank labels are skipped.
pub fn merge_labels(existing: &mut Vec<String>, added: &[String]) {
    for label in added {
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        let key = skill_key(label);
        if !existing.iter().any(|l| skill_key(l) == key) {
            existing.push(label.to_string());
        }
    }
}

/// Work history, current position first, then by most recent start.
pub fn sort_experience(entries: &mut [WorkExperience]) {
    entries.sort_by(|a, b| {
        b.is_current()
            .cmp(&a.is_current())
            .then_with(|| b.start_date.cmp(&a.start_date))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, start: (i32, u32), end: Option<(i32, u32)>) -> WorkExperience {
        WorkExperience {
            id: id.to_string(),
            company: "Acme".to_string(),
            title: "Engineer".to_string(),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, 1).unwrap(),
            end_date: end.map(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1).unwrap()),
            description: None,
        }
    }

    #[test]
    fn test_merge_labels_dedupes_and_skips_blank() {
        let mut labels = vec!["Systems Programming".to_string()];
        merge_labels(
            &mut labels,
            &[
                " systems programming ".to_string(),
                "".to_string(),
                "Embedded".to_string(),
                "EMBEDDED".to_string(),
            ],
        );
        assert_eq!(labels, vec!["Systems Programming", "Embedded"]);
    }

    #[test]
    fn test_sort_experience_current_first() {
        let mut entries = vec![
            job("old", (2010, 1), Some((2014, 6))),
            job("recent", (2015, 1), Some((2020, 1))),
            job("now", (2020, 2), None),
        ];
        sort_experience(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["now", "recent", "old"]);
    }

    #[test]
    fn test_remove_entry() {
        let mut entries = vec![job("a", (2010, 1), None), job("b", (2012, 1), None)];
        assert!(remove_entry(&mut entries, "a"));
        assert!(!remove_entry(&mut entries, "a"));
        assert_eq!(entries.len(), 1);
        assert!(find_entry(&mut entries, "b").is_some());
    }
}
