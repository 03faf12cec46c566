// ABOUTME: Persistence tests for users, preferences, meal entries, and challenge completion
// ABOUTME: Uses in-memory databases plus a temporary file database for reopen checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use companion_core::errors::ErrorCode;
use companion_intelligence::challenges::{build_progress_map, find_challenge};
use fitness_companion::config::{DatabaseConfig, DatabaseUrl};
use fitness_companion::database::Database;
use fitness_companion::models::{
    AwardKind, MealPreferences, NewMealPlanEntry, User, UserChallenge,
};
use uuid::Uuid;

fn enrollment(user_id: Uuid, challenge_id: &str) -> UserChallenge {
    let now = Utc::now();
    let challenge = find_challenge(challenge_id).unwrap();
    UserChallenge {
        id: Uuid::new_v4(),
        user_id,
        challenge_id: challenge.id.to_owned(),
        start_date: now,
        end_date: now,
        progress: build_progress_map(now, challenge.duration_days),
        completed: false,
        completed_at: None,
        created_at: now,
    }
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(DatabaseUrl::SQLite {
        path: dir.path().join("nested").join("companion.db"),
    });

    let user_id = {
        let database = Database::new(&config).await.unwrap();
        common::create_test_user(&database, "persist@example.com").await.id
    };

    let reopened = Database::new(&config).await.unwrap();
    let user = reopened.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(user.email, "persist@example.com");
    assert_eq!(user.profile.fitness_goals, vec!["stay_fit".to_owned()]);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let database = common::create_test_database().await;
    common::create_test_user(&database, "dup@example.com").await;

    let err = database
        .create_user(&User::new(
            "dup@example.com".into(),
            "hash".into(),
            common::sample_profile(),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_preferences_are_one_per_user() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "upsert@example.com").await;

    let first = database
        .upsert_preferences(user.id, &MealPreferences::new("adult", "vegetarian", "stay_fit"))
        .await
        .unwrap();
    let second = database
        .upsert_preferences(user.id, &MealPreferences::new("older", "vegetarian", "weight_loss"))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(second.preferences.age_group, "older");
}

#[tokio::test]
async fn test_meal_entries_are_scoped_by_owner_and_date() {
    let database = common::create_test_database().await;
    let owner = common::create_test_user(&database, "a@example.com").await;
    let other = common::create_test_user(&database, "b@example.com").await;
    let day = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();

    let entry = database
        .create_meal_entry(
            owner.id,
            &NewMealPlanEntry {
                meal_type: "dinner".into(),
                meal_name: "Khichdi".into(),
                quantity: 1.0,
                date: day,
            },
        )
        .await
        .unwrap();

    assert_eq!(database.list_meal_entries(owner.id, day).await.unwrap().len(), 1);
    assert!(database.list_meal_entries(other.id, day).await.unwrap().is_empty());
    assert!(database
        .list_meal_entries(owner.id, day.succ_opt().unwrap())
        .await
        .unwrap()
        .is_empty());

    assert!(!database.update_meal_entry(other.id, entry.id, "x", 1.0).await.unwrap());
    assert!(!database.delete_meal_entry(other.id, entry.id).await.unwrap());
    assert!(database.delete_meal_entry(owner.id, entry.id).await.unwrap());
}

#[tokio::test]
async fn test_challenge_completion_rewards_exactly_once() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "once@example.com").await;
    let uc = enrollment(user.id, "5");
    database.create_user_challenge(&uc).await.unwrap();
    let days: Vec<String> = uc.progress.keys().cloned().collect();

    let (last, earlier) = days.split_last().unwrap();
    for day in earlier {
        let marked = database
            .mark_challenge_day(user.id, uc.id, day, Utc::now())
            .await
            .unwrap();
        assert!(marked.completion.is_none());
        assert!(!marked.user_challenge.completed);
    }

    let finished = database
        .mark_challenge_day(user.id, uc.id, last, Utc::now())
        .await
        .unwrap();
    let completion = finished.completion.expect("last day grants rewards");
    assert!(finished.user_challenge.completed);
    assert!(completion.outcome.leveled_up);
    assert_eq!(completion.outcome.level, 2);
    assert_eq!(completion.awards.len(), 2);

    let again = database
        .mark_challenge_day(user.id, uc.id, &days[0], Utc::now())
        .await
        .unwrap();
    assert!(again.completion.is_none());

    let stored = database.get_user(user.id).await.unwrap().unwrap();
    assert_eq!((stored.level, stored.experience), (2, 100));
    assert_eq!(database.count_awards(user.id, AwardKind::Badge).await.unwrap(), 1);
    assert_eq!(database.count_awards(user.id, AwardKind::Milestone).await.unwrap(), 1);

    let reloaded = database.get_user_challenge(user.id, uc.id).await.unwrap().unwrap();
    assert!(reloaded.completed);
    assert!(reloaded.completed_at.is_some());
    assert!(reloaded.progress.values().all(|done| *done));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_day_marks_complete_challenge_once() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let database = Arc::new(
        Database::new(&DatabaseConfig::new(DatabaseUrl::SQLite {
            path: dir.path().join("concurrent.db"),
        }))
        .await
        .unwrap(),
    );

    for round in 0..5 {
        let user = common::create_test_user(&database, &format!("race{round}@example.com")).await;
        let uc = enrollment(user.id, "1");
        database.create_user_challenge(&uc).await.unwrap();
        let (user_id, uc_id) = (user.id, uc.id);

        let marks: Vec<_> = uc
            .progress
            .keys()
            .cloned()
            .map(|day| {
                let database = Arc::clone(&database);
                tokio::spawn(async move {
                    database.mark_challenge_day(user_id, uc_id, &day, Utc::now()).await
                })
            })
            .collect();

        let mut completions = 0;
        for mark in marks {
            if mark.await.unwrap().unwrap().completion.is_some() {
                completions += 1;
            }
        }
        assert_eq!(completions, 1, "round {round}: exactly one day finishes the challenge");

        let stored = database.get_user_challenge(user.id, uc.id).await.unwrap().unwrap();
        assert!(stored.completed);
        assert!(stored.progress.values().all(|done| *done));

        let user_after = database.get_user(user.id).await.unwrap().unwrap();
        assert_eq!(user_after.experience, 50);
        assert_eq!(database.count_awards(user.id, AwardKind::Badge).await.unwrap(), 1);
    }
}

#[tokio::test]
async fn test_marking_rejects_unknown_day_and_foreign_owner() {
    let database = common::create_test_database().await;
    let owner = common::create_test_user(&database, "owner@example.com").await;
    let other = common::create_test_user(&database, "other@example.com").await;
    let uc = enrollment(owner.id, "2");
    database.create_user_challenge(&uc).await.unwrap();
    let first_day = uc.progress.keys().next().unwrap().clone();

    for bad_day in ["1999-01-01", "not-a-day", "2025-01-01\" OR 1"] {
        let err = database
            .mark_challenge_day(owner.id, uc.id, bad_day, Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "{bad_day}");
    }

    let err = database
        .mark_challenge_day(other.id, uc.id, &first_day, Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let untouched = database.get_user_challenge(owner.id, uc.id).await.unwrap().unwrap();
    assert_eq!(untouched.progress.len(), 7);
    assert!(untouched.progress.values().all(|done| !*done));
}

#[tokio::test]
async fn test_only_one_open_enrollment_per_challenge() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "open@example.com").await;

    database.create_user_challenge(&enrollment(user.id, "2")).await.unwrap();
    let err = database
        .create_user_challenge(&enrollment(user.id, "2"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    assert!(database
        .find_active_user_challenge(user.id, "2")
        .await
        .unwrap()
        .is_some());
    assert!(database
        .get_user_challenge(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}
