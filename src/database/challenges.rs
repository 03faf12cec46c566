// ABOUTME: Challenge enrollment persistence and the transactional completion reward
// ABOUTME: Marking the last open day completes the challenge and grants its reward in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use super::users::insert_award;
use super::{decode_timestamp, decode_u32, decode_uuid, encode_timestamp, Database};
use crate::models::{Award, UserChallenge};
use chrono::{DateTime, NaiveDate, Utc};
use companion_core::constants::formats::DAY_FORMAT;
use companion_core::errors::{AppError, AppResult};
use companion_intelligence::challenges::{challenge_xp, is_fully_completed};
use companion_intelligence::progression::{
    apply_experience, challenge_badge, level_milestone, ProgressionOutcome,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use tracing::debug;
use uuid::Uuid;

/// Result of the transition of an enrollment to completed
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeCompletion {
    /// Level and experience after the grant
    pub outcome: ProgressionOutcome,
    /// Awards appended by this completion, in award order
    pub awards: Vec<Award>,
}

/// Outcome of marking one challenge day done
#[derive(Debug, Clone)]
pub struct DayCompletion {
    /// Enrollment after the update
    pub user_challenge: UserChallenge,
    /// Present when this day finished the challenge
    pub completion: Option<ChallengeCompletion>,
}

impl Database {
    pub(super) async fn migrate_challenges(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_challenges (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                challenge_id TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                progress TEXT NOT NULL DEFAULT '{}',
                completed BOOLEAN NOT NULL DEFAULT 0,
                completed_at TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // At most one open enrollment per user and challenge
        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_user_challenges_open
            ON user_challenges(user_id, challenge_id) WHERE completed = 0
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a new enrollment
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the user already has an open enrollment
    /// for the same challenge, or a database error
    pub async fn create_user_challenge(&self, challenge: &UserChallenge) -> AppResult<()> {
        let result = sqlx::query(
            r"
            INSERT INTO user_challenges (
                id, user_id, challenge_id, start_date, end_date, progress, completed,
                completed_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(challenge.id.to_string())
        .bind(challenge.user_id.to_string())
        .bind(&challenge.challenge_id)
        .bind(encode_timestamp(challenge.start_date))
        .bind(encode_timestamp(challenge.end_date))
        .bind(serde_json::to_string(&challenge.progress)?)
        .bind(challenge.completed)
        .bind(challenge.completed_at.map(encode_timestamp))
        .bind(encode_timestamp(challenge.created_at))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::already_exists("Already joined this challenge"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Open (not completed) enrollment of a user in a catalog challenge
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn find_active_user_challenge(
        &self,
        user_id: Uuid,
        challenge_id: &str,
    ) -> AppResult<Option<UserChallenge>> {
        let row = sqlx::query(
            "SELECT * FROM user_challenges WHERE user_id = $1 AND challenge_id = $2 AND completed = 0",
        )
        .bind(user_id.to_string())
        .bind(challenge_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_user_challenge).transpose()
    }

    /// All enrollments of a user, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_user_challenges(&self, user_id: Uuid) -> AppResult<Vec<UserChallenge>> {
        let rows = sqlx::query(
            "SELECT * FROM user_challenges WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_user_challenge).collect()
    }

    /// Enrollment by id, only when owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user_challenge(
        &self,
        user_id: Uuid,
        user_challenge_id: Uuid,
    ) -> AppResult<Option<UserChallenge>> {
        let row = sqlx::query("SELECT * FROM user_challenges WHERE id = $1 AND user_id = $2")
            .bind(user_challenge_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_user_challenge).transpose()
    }

    /// Mark `day` done and, when it was the last open day, complete the
    /// enrollment and grant its reward
    ///
    /// The day is set with a single `json_set` UPDATE issued as the first
    /// statement of the transaction, so the transaction holds the write lock
    /// before it reads the map back. Concurrent calls for different days are
    /// therefore serialized and exactly one of them observes the full map.
    /// Marking a day of an already completed enrollment stores the day and
    /// grants nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `user_id` owns no such enrollment,
    /// `InvalidInput` when `day` is not one of its progress days, or a
    /// database error; nothing is written in the error cases
    pub async fn mark_challenge_day(
        &self,
        user_id: Uuid,
        user_challenge_id: Uuid,
        day: &str,
        now: DateTime<Utc>,
    ) -> AppResult<DayCompletion> {
        let path = progress_day_path(day)?;
        let mut tx = self.pool.begin().await?;

        let marked = sqlx::query(
            r"
            UPDATE user_challenges
            SET progress = json_set(progress, $1, json('true'))
            WHERE id = $2 AND user_id = $3 AND json_type(progress, $4) IS NOT NULL
            ",
        )
        .bind(&path)
        .bind(user_challenge_id.to_string())
        .bind(user_id.to_string())
        .bind(&path)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query("SELECT * FROM user_challenges WHERE id = $1 AND user_id = $2")
            .bind(user_challenge_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found("Challenge"))?;
        if marked.rows_affected() == 0 {
            return Err(unknown_day(day));
        }

        let mut user_challenge = row_to_user_challenge(&row)?;
        if user_challenge.completed || !is_fully_completed(&user_challenge.progress) {
            tx.commit().await?;
            return Ok(DayCompletion {
                user_challenge,
                completion: None,
            });
        }

        let completion = grant_completion(&mut tx, &user_challenge, now).await?;
        tx.commit().await?;

        user_challenge.completed = true;
        user_challenge.completed_at = Some(now);
        Ok(DayCompletion {
            user_challenge,
            completion: Some(completion),
        })
    }
}

/// JSON path of a progress day; only calendar days can be progress keys
fn progress_day_path(day: &str) -> AppResult<String> {
    NaiveDate::parse_from_str(day, DAY_FORMAT).map_err(|_| unknown_day(day))?;
    Ok(format!("$.\"{day}\""))
}

fn unknown_day(day: &str) -> AppError {
    AppError::invalid_input(format!("Day {day} is not part of this challenge"))
}

/// Flag the enrollment completed, add its experience, and append awards
async fn grant_completion(
    tx: &mut Transaction<'_, Sqlite>,
    user_challenge: &UserChallenge,
    now: DateTime<Utc>,
) -> AppResult<ChallengeCompletion> {
    let user_id = user_challenge.user_id;
    sqlx::query(
        "UPDATE user_challenges SET completed = 1, completed_at = $1 WHERE id = $2 AND completed = 0",
    )
    .bind(encode_timestamp(now))
    .bind(user_challenge.id.to_string())
    .execute(&mut **tx)
    .await?;

    let row = sqlx::query("SELECT level, experience FROM users WHERE id = $1")
        .bind(user_id.to_string())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    let level: i64 = row.try_get("level")?;
    let experience: i64 = row.try_get("experience")?;
    let xp = challenge_xp(&user_challenge.challenge_id);
    let outcome = apply_experience(
        decode_u32(level, "level")?,
        decode_u32(experience, "experience")?,
        xp,
    );

    sqlx::query("UPDATE users SET level = $1, experience = $2 WHERE id = $3")
        .bind(i64::from(outcome.level))
        .bind(i64::from(outcome.experience))
        .bind(user_id.to_string())
        .execute(&mut **tx)
        .await?;

    let mut awards = vec![challenge_badge(now)];
    if outcome.leveled_up {
        awards.push(level_milestone(outcome.level, now));
    }
    for award in &awards {
        insert_award(tx, user_id, award).await?;
    }

    debug!(%user_id, challenge_id = %user_challenge.challenge_id, xp, "Challenge reward granted");
    Ok(ChallengeCompletion { outcome, awards })
}

fn row_to_user_challenge(row: &SqliteRow) -> AppResult<UserChallenge> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let start_date: String = row.try_get("start_date")?;
    let end_date: String = row.try_get("end_date")?;
    let progress: String = row.try_get("progress")?;
    let completed_at: Option<String> = row.try_get("completed_at")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(UserChallenge {
        id: decode_uuid(&id)?,
        user_id: decode_uuid(&user_id)?,
        challenge_id: row.try_get("challenge_id")?,
        start_date: decode_timestamp(&start_date)?,
        end_date: decode_timestamp(&end_date)?,
        progress: serde_json::from_str(&progress)?,
        completed: row.try_get("completed")?,
        completed_at: completed_at.as_deref().map(decode_timestamp).transpose()?,
        created_at: decode_timestamp(&created_at)?,
    })
}
