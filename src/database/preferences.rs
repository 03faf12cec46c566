// ABOUTME: Meal preference persistence, one record per user
// ABOUTME: Upserts keep the existing id and creation time while refreshing updated_at
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use super::{decode_timestamp, decode_uuid, encode_timestamp, Database};
use crate::models::{MealPreferences, StoredPreferences};
use chrono::Utc;
use companion_core::errors::{AppError, AppResult};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_preferences(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_preferences (
                id TEXT PRIMARY KEY,
                user_id TEXT UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                age_group TEXT NOT NULL,
                dietary_preference TEXT NOT NULL,
                fitness_goal TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Create or replace the caller's meal preferences
    ///
    /// # Errors
    ///
    /// Returns an error if the write or the read-back fails
    pub async fn upsert_preferences(
        &self,
        user_id: Uuid,
        preferences: &MealPreferences,
    ) -> AppResult<StoredPreferences> {
        let now = encode_timestamp(Utc::now());
        sqlx::query(
            r"
            INSERT INTO meal_preferences (
                id, user_id, age_group, dietary_preference, fitness_goal, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT(user_id) DO UPDATE SET
                age_group = excluded.age_group,
                dietary_preference = excluded.dietary_preference,
                fitness_goal = excluded.fitness_goal,
                updated_at = excluded.updated_at
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id.to_string())
        .bind(&preferences.age_group)
        .bind(&preferences.dietary_preference)
        .bind(&preferences.fitness_goal)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_preferences(user_id)
            .await?
            .ok_or_else(|| AppError::internal("Preferences missing after upsert"))
    }

    /// Stored preferences for a user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_preferences(&self, user_id: Uuid) -> AppResult<Option<StoredPreferences>> {
        let row = sqlx::query("SELECT * FROM meal_preferences WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_preferences).transpose()
    }
}

fn row_to_preferences(row: &SqliteRow) -> AppResult<StoredPreferences> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(StoredPreferences {
        id: decode_uuid(&id)?,
        user_id: decode_uuid(&user_id)?,
        preferences: MealPreferences::new(
            row.try_get::<String, _>("age_group")?,
            row.try_get::<String, _>("dietary_preference")?,
            row.try_get::<String, _>("fitness_goal")?,
        ),
        created_at: decode_timestamp(&created_at)?,
        updated_at: decode_timestamp(&updated_at)?,
    })
}
