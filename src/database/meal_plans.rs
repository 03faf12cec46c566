// ABOUTME: Persistence for generated meal plans and manual per-day meal entries
// ABOUTME: Generated plans store each slot as JSON; manual entries are keyed by calendar date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use super::{decode_timestamp, decode_uuid, encode_timestamp, Database};
use crate::models::{GeneratedMealPlan, MealPlan, MealPlanEntry, NewMealPlanEntry};
use chrono::{DateTime, NaiveDate, Utc};
use companion_core::constants::formats::DAY_FORMAT;
use companion_core::errors::{AppError, AppResult};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_meal_plans(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS generated_meal_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date TEXT NOT NULL,
                breakfast TEXT NOT NULL,
                lunch TEXT NOT NULL,
                dinner TEXT NOT NULL,
                generated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_generated_meal_plans_user_date ON generated_meal_plans(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_plan_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                meal_type TEXT NOT NULL,
                meal_name TEXT NOT NULL,
                quantity REAL NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_meal_plan_entries_user_date ON meal_plan_entries(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist a generated plan for a user
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert_generated_plan(
        &self,
        user_id: Uuid,
        plan: &MealPlan,
    ) -> AppResult<GeneratedMealPlan> {
        let record = GeneratedMealPlan {
            id: Uuid::new_v4(),
            user_id,
            date: plan.generated_at,
            plan: plan.clone(),
        };

        sqlx::query(
            r"
            INSERT INTO generated_meal_plans (id, user_id, date, breakfast, lunch, dinner, generated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(record.id.to_string())
        .bind(user_id.to_string())
        .bind(encode_timestamp(record.date))
        .bind(serde_json::to_string(&plan.breakfast)?)
        .bind(serde_json::to_string(&plan.lunch)?)
        .bind(serde_json::to_string(&plan.dinner)?)
        .bind(encode_timestamp(plan.generated_at))
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Generated plans dated at or after `since`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_generated_plans_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<GeneratedMealPlan>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM generated_meal_plans
            WHERE user_id = $1 AND date >= $2
            ORDER BY date DESC
            ",
        )
        .bind(user_id.to_string())
        .bind(encode_timestamp(since))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_generated_plan).collect()
    }

    /// Add a manual meal entry
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_meal_entry(
        &self,
        user_id: Uuid,
        entry: &NewMealPlanEntry,
    ) -> AppResult<MealPlanEntry> {
        let stored = MealPlanEntry {
            id: Uuid::new_v4(),
            user_id,
            meal_type: entry.meal_type.clone(),
            meal_name: entry.meal_name.clone(),
            quantity: entry.quantity,
            date: entry.date,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO meal_plan_entries (id, user_id, meal_type, meal_name, quantity, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(stored.id.to_string())
        .bind(user_id.to_string())
        .bind(&stored.meal_type)
        .bind(&stored.meal_name)
        .bind(stored.quantity)
        .bind(stored.date.format(DAY_FORMAT).to_string())
        .bind(encode_timestamp(stored.created_at))
        .execute(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Manual entries for one calendar date, in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_meal_entries(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<MealPlanEntry>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM meal_plan_entries
            WHERE user_id = $1 AND date = $2
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(date.format(DAY_FORMAT).to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_entry).collect()
    }

    /// Change the meal and quantity of an entry owned by `user_id`
    ///
    /// Returns `false` when no owned entry matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_meal_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        meal_name: &str,
        quantity: f64,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE meal_plan_entries SET meal_name = $1, quantity = $2 WHERE id = $3 AND user_id = $4",
        )
        .bind(meal_name)
        .bind(quantity)
        .bind(entry_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an entry owned by `user_id`
    ///
    /// Returns `false` when no owned entry matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_meal_entry(&self, user_id: Uuid, entry_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meal_plan_entries WHERE id = $1 AND user_id = $2")
            .bind(entry_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_generated_plan(row: &SqliteRow) -> AppResult<GeneratedMealPlan> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let date: String = row.try_get("date")?;
    let breakfast: String = row.try_get("breakfast")?;
    let lunch: String = row.try_get("lunch")?;
    let dinner: String = row.try_get("dinner")?;
    let generated_at: String = row.try_get("generated_at")?;

    Ok(GeneratedMealPlan {
        id: decode_uuid(&id)?,
        user_id: decode_uuid(&user_id)?,
        date: decode_timestamp(&date)?,
        plan: MealPlan {
            breakfast: serde_json::from_str(&breakfast)?,
            lunch: serde_json::from_str(&lunch)?,
            dinner: serde_json::from_str(&dinner)?,
            generated_at: decode_timestamp(&generated_at)?,
        },
    })
}

fn row_to_entry(row: &SqliteRow) -> AppResult<MealPlanEntry> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let date: String = row.try_get("date")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(MealPlanEntry {
        id: decode_uuid(&id)?,
        user_id: decode_uuid(&user_id)?,
        meal_type: row.try_get("meal_type")?,
        meal_name: row.try_get("meal_name")?,
        quantity: row.try_get("quantity")?,
        date: NaiveDate::parse_from_str(&date, DAY_FORMAT)
            .map_err(|e| AppError::database(format!("Invalid stored date {date:?}: {e}")))?,
        created_at: decode_timestamp(&created_at)?,
    })
}
