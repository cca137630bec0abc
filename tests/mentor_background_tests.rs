// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mentor background sections through the typed client.

use chrono::NaiveDate;
use mentorhub::client::{ApiClient, AuthContext, RequestStrategy};
use mentorhub::models::Role;
use mentorhub::routes::background::{
    NewBadge, NewCertification, NewCompetitionEntry, NewOpenSourceAchievement,
    NewUnavailableDate, NewWorkExperience, UpdateCompetitionEntry, UpdateWorkExperience,
};
use mentorhub::AppState;
use std::sync::Arc;

mod common;

fn client_for(state: &Arc<AppState>, base: &str, username: &str) -> ApiClient {
    let user = state.db.find_user_by_username(username).unwrap();
    let token = common::token_for(state, &user);
    ApiClient::new(base, RequestStrategy::Direct, AuthContext::from_token(token))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn job(company: &str, start: NaiveDate, end: Option<NaiveDate>) -> NewWorkExperience {
    NewWorkExperience {
        company: company.to_string(),
        title: "Engineer".to_string(),
        start_date: start,
        end_date: end,
        description: None,
    }
}

fn contest(name: &str, year: u16) -> NewCompetitionEntry {
    NewCompetitionEntry {
        name: name.to_string(),
        year,
        placement: None,
        description: None,
    }
}

#[tokio::test]
async fn test_expertise_and_specializations_merge() {
    let (_, state) = common::create_test_app();
    let (_, profile) = common::seed_mentor(&state, "mentor", 50.0, 0.0, &["Rust"]);
    let base = common::spawn_server(state.clone()).await;
    let client = client_for(&state, &base, "mentor");

    client
        .add_mentor_expertise(&profile.id, vec!["Embedded".to_string()])
        .await
        .unwrap();
    let areas = client
        .add_mentor_expertise(
            &profile.id,
            vec!["embedded ".to_string(), "Compilers".to_string()],
        )
        .await
        .unwrap();
    assert_eq!(areas, vec!["Embedded", "Compilers"]);
    assert_eq!(client.get_mentor_expertise(&profile.id).await.unwrap(), areas);

    let specializations = client
        .add_mentor_specializations(&profile.id, vec!["Async runtimes".to_string()])
        .await
        .unwrap();
    assert_eq!(specializations, vec!["Async runtimes"]);

    let err = client
        .add_mentor_specializations(&profile.id, vec![])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_work_experience_crud() {
    let (_, state) = common::create_test_app();
    let (_, profile) = common::seed_mentor(&state, "mentor", 50.0, 0.0, &[]);
    let base = common::spawn_server(state.clone()).await;
    let client = client_for(&state, &base, "mentor");

    let old = client
        .add_work_experience(
            &profile.id,
            &job("Initech", date(2012, 1, 1), Some(date(2016, 6, 30))),
        )
        .await
        .unwrap();
    let current = client
        .add_work_experience(&profile.id, &job("Acme", date(2017, 3, 1), None))
        .await
        .unwrap();

    let history = client.get_work_experience(&profile.id).await.unwrap();
    assert_eq!(history[0].id, current.id);
    assert_eq!(history[1].id, old.id);

    let err = client
        .add_work_experience(
            &profile.id,
            &job("Backwards", date(2020, 1, 1), Some(date(2019, 1, 1))),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));

    let updated = client
        .update_work_experience(
            &profile.id,
            &current.id,
            &UpdateWorkExperience {
                title: Some("Staff Engineer".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Staff Engineer");
    assert_eq!(updated.company, "Acme");

    // An end date before the start is refused and nothing changes
    let err = client
        .update_work_experience(
            &profile.id,
            &current.id,
            &UpdateWorkExperience {
                end_date: Some(date(2010, 1, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(client.get_work_experience(&profile.id).await.unwrap()[0].is_current());

    let remaining = client
        .delete_work_experience(&profile.id, &old.id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);

    let err = client
        .delete_work_experience(&profile.id, &old.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Experience not found");
}

#[tokio::test]
async fn test_certifications_and_open_source() {
    let (_, state) = common::create_test_app();
    let (_, profile) = common::seed_mentor(&state, "mentor", 50.0, 0.0, &[]);
    let base = common::spawn_server(state.clone()).await;
    let client = client_for(&state, &base, "mentor");

    let cert = client
        .add_certification(
            &profile.id,
            &NewCertification {
                name: "CKA".to_string(),
                issuer: "CNCF".to_string(),
                issued_on: Some(date(2023, 5, 2)),
                credential_url: Some("https://example.com/cka/123".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(client.get_certifications(&profile.id).await.unwrap(), vec![cert.clone()]);

    let err = client
        .add_certification(
            &profile.id,
            &NewCertification {
                name: "Fake".to_string(),
                issuer: "Nobody".to_string(),
                issued_on: None,
                credential_url: Some("not a url".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));

    assert!(client
        .delete_certification(&profile.id, &cert.id)
        .await
        .unwrap()
        .is_empty());

    let achievement = client
        .add_open_source_achievement(
            &profile.id,
            &NewOpenSourceAchievement {
                project: "tokio".to_string(),
                description: "Maintainer of the timer wheel".to_string(),
                url: None,
            },
        )
        .await
        .unwrap();
    let listed = client.get_open_source_achievements(&profile.id).await.unwrap();
    assert_eq!(listed, vec![achievement]);
}

#[tokio::test]
async fn test_competitions_newest_first() {
    let (_, state) = common::create_test_app();
    let (_, profile) = common::seed_mentor(&state, "mentor", 50.0, 0.0, &[]);
    let base = common::spawn_server(state.clone()).await;
    let client = client_for(&state, &base, "mentor");

    let icpc = client
        .add_competition_experience(&profile.id, &contest("ICPC", 2015))
        .await
        .unwrap();
    client
        .add_competition_experience(&profile.id, &contest("Advent of Code", 2022))
        .await
        .unwrap();

    let err = client
        .add_competition_experience(&profile.id, &contest("Ancient", 1900))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));

    let updated = client
        .update_competition_experience(
            &profile.id,
            &icpc.id,
            &UpdateCompetitionEntry {
                year: Some(2023),
                placement: Some("Finalist".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.placement.as_deref(), Some("Finalist"));

    let entries = client.get_competition_experience(&profile.id).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["ICPC", "Advent of Code"]);

    let remaining = client
        .delete_competition_experience(&profile.id, &icpc.id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn test_badges_and_unavailable_dates() {
    let (_, state) = common::create_test_app();
    let (_, profile) = common::seed_mentor(&state, "mentor", 50.0, 0.0, &[]);
    let base = common::spawn_server(state.clone()).await;
    let client = client_for(&state, &base, "mentor");

    let badge = NewBadge {
        name: "Top Mentor".to_string(),
        description: None,
    };
    client.add_mentor_badge(&profile.id, &badge).await.unwrap();
    let err = client
        .add_mentor_badge(
            &profile.id,
            &NewBadge {
                name: "top mentor".to_string(),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(client.get_mentor_badges(&profile.id).await.unwrap().len(), 1);

    for day in [date(2025, 12, 31), date(2025, 12, 24)] {
        client
            .add_unavailable_date(
                &profile.id,
                &NewUnavailableDate {
                    date: day,
                    reason: Some("Holiday".to_string()),
                },
            )
            .await
            .unwrap();
    }
    let err = client
        .add_unavailable_date(
            &profile.id,
            &NewUnavailableDate {
                date: date(2025, 12, 24),
                reason: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(409));

    let days: Vec<NaiveDate> = client
        .get_unavailable_dates(&profile.id)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.date)
        .collect();
    assert_eq!(days, vec![date(2025, 12, 24), date(2025, 12, 31)]);
}

#[tokio::test]
async fn test_background_owner_only_but_publicly_readable() {
    let (_, state) = common::create_test_app();
    let (_, profile) = common::seed_mentor(&state, "mentor", 50.0, 0.0, &[]);
    common::seed_user(&state, "student", Some(Role::Student));
    let base = common::spawn_server(state.clone()).await;
    let mentor = client_for(&state, &base, "mentor");
    let student = client_for(&state, &base, "student");

    mentor
        .add_work_experience(&profile.id, &job("Acme", date(2019, 1, 1), None))
        .await
        .unwrap();

    let err = student
        .add_work_experience(&profile.id, &job("Hijack", date(2019, 1, 1), None))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));

    let err = student
        .add_mentor_expertise(&profile.id, vec!["Anything".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));

    assert_eq!(student.get_work_experience(&profile.id).await.unwrap().len(), 1);

    let details = student.get_complete_mentor_profile(&profile.id).await.unwrap();
    assert_eq!(details.profile.experience.len(), 1);
    assert!(details.profile.expertise_areas.is_empty());

    let err = student.get_mentor_badges("no-such-profile").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
