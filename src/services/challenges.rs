// ABOUTME: Challenge enrollment and day-completion rules
// ABOUTME: Rejects duplicate joins and unknown days; rewards only the transition to completed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use chrono::{DateTime, Duration, Utc};
use companion_core::errors::{AppError, AppResult};
use companion_intelligence::challenges::{build_progress_map, find_challenge, CHALLENGES};
use tracing::info;
use uuid::Uuid;

use crate::database::{Database, DayCompletion};
use crate::logging::AppLogger;
use crate::models::{ChallengeStatus, UserChallenge, UserChallengeView};

/// Catalog annotated with the caller's joined/completed flags
///
/// # Errors
///
/// Returns an error if enrollments cannot be loaded
pub async fn list_with_status(database: &Database, user_id: Uuid) -> AppResult<Vec<ChallengeStatus>> {
    let enrollments = database.list_user_challenges(user_id).await?;
    Ok(CHALLENGES
        .iter()
        .map(|challenge| {
            let mut mine = enrollments.iter().filter(|uc| uc.challenge_id == challenge.id);
            let joined = mine.clone().next().is_some();
            ChallengeStatus {
                challenge,
                joined,
                completed: mine.any(|uc| uc.completed),
            }
        })
        .collect())
}

/// Enroll the caller in a catalog challenge starting at `now`
///
/// # Errors
///
/// Returns `NotFound` for an unknown challenge and `AlreadyExists` when an
/// open enrollment for it already exists
pub async fn join(
    database: &Database,
    user_id: Uuid,
    challenge_id: &str,
    now: DateTime<Utc>,
) -> AppResult<UserChallenge> {
    let challenge = find_challenge(challenge_id).ok_or_else(|| AppError::not_found("Challenge"))?;

    if database
        .find_active_user_challenge(user_id, challenge.id)
        .await?
        .is_some()
    {
        return Err(AppError::already_exists("Already joined this challenge"));
    }

    let user_challenge = UserChallenge {
        id: Uuid::new_v4(),
        user_id,
        challenge_id: challenge.id.to_owned(),
        start_date: now,
        end_date: now + Duration::days(i64::from(challenge.duration_days)),
        progress: build_progress_map(now, challenge.duration_days),
        completed: false,
        completed_at: None,
        created_at: now,
    };
    database.create_user_challenge(&user_challenge).await?;

    info!(%user_id, challenge_id = challenge.id, "Joined challenge");
    Ok(user_challenge)
}

/// Caller's enrollments with catalog details attached
///
/// # Errors
///
/// Returns an error if enrollments cannot be loaded
pub async fn list_enrollments(database: &Database, user_id: Uuid) -> AppResult<Vec<UserChallengeView>> {
    Ok(database
        .list_user_challenges(user_id)
        .await?
        .into_iter()
        .map(|uc| {
            let challenge = find_challenge(&uc.challenge_id);
            UserChallengeView::new(uc, challenge)
        })
        .collect())
}

/// Mark `day` done; finishing the last open day completes the challenge
///
/// Completing a day of an already completed challenge is accepted but grants
/// nothing further.
///
/// # Errors
///
/// Returns `NotFound` when the caller owns no such enrollment and
/// `InvalidInput` when `day` is not one of its progress days
pub async fn complete_day(
    database: &Database,
    user_id: Uuid,
    user_challenge_id: Uuid,
    day: &str,
    now: DateTime<Utc>,
) -> AppResult<DayCompletion> {
    let result = database
        .mark_challenge_day(user_id, user_challenge_id, day, now)
        .await?;

    if let Some(done) = &result.completion {
        info!(
            %user_id,
            challenge_id = %result.user_challenge.challenge_id,
            level = done.outcome.level,
            experience = done.outcome.experience,
            "Challenge completed"
        );
        for award in &done.awards {
            AppLogger::log_award(&user_id.to_string(), award.kind.as_str(), &award.name);
        }
    }

    Ok(result)
}
