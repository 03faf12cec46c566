// ABOUTME: User account and award persistence
// ABOUTME: Stores profiles with JSON-encoded goals and keeps badges/milestones in award order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use super::{decode_timestamp, decode_u32, decode_uuid, encode_timestamp, Database};
use crate::models::{Award, AwardKind, User, UserProfile};
use companion_core::constants::error_messages::EMAIL_TAKEN;
use companion_core::errors::{AppError, AppResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                full_name TEXT NOT NULL,
                age INTEGER NOT NULL,
                gender TEXT NOT NULL,
                weight REAL NOT NULL,
                height REAL NOT NULL,
                fitness_level TEXT NOT NULL,
                fitness_goals TEXT NOT NULL DEFAULT '[]',
                medical_conditions TEXT NOT NULL DEFAULT '',
                preferred_units TEXT NOT NULL DEFAULT 'metric',
                target_weight REAL,
                level INTEGER NOT NULL DEFAULT 1,
                experience INTEGER NOT NULL DEFAULT 0,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                is_admin BOOLEAN NOT NULL DEFAULT 0,
                profile_complete BOOLEAN NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_awards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                kind TEXT NOT NULL CHECK (kind IN ('badge', 'milestone')),
                name TEXT NOT NULL,
                details TEXT NOT NULL,
                icon TEXT NOT NULL,
                category TEXT NOT NULL,
                awarded_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_user_awards_user ON user_awards(user_id, kind)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new user; the first account ever stored is flagged admin
    ///
    /// Returns the user as stored, with the admin flag resolved.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` when the email is taken, or a database error
    pub async fn create_user(&self, user: &User) -> AppResult<User> {
        let goals = serde_json::to_string(&user.profile.fitness_goals)?;
        let result = sqlx::query(
            r"
            INSERT INTO users (
                id, email, password_hash, full_name, age, gender, weight, height,
                fitness_level, fitness_goals, medical_conditions, preferred_units,
                target_weight, level, experience, is_active, is_admin,
                profile_complete, created_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                (SELECT COUNT(*) = 0 FROM users), $17, $18
            )
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.profile.full_name)
        .bind(i64::from(user.profile.age))
        .bind(&user.profile.gender)
        .bind(user.profile.weight)
        .bind(user.profile.height)
        .bind(&user.profile.fitness_level)
        .bind(goals)
        .bind(&user.profile.medical_conditions)
        .bind(&user.profile.preferred_units)
        .bind(user.profile.target_weight)
        .bind(i64::from(user.level))
        .bind(i64::from(user.experience))
        .bind(user.is_active)
        .bind(user.profile_complete)
        .bind(encode_timestamp(user.created_at))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(AppError::already_exists(EMAIL_TAKEN));
            }
            Err(e) => return Err(e.into()),
        }

        self.get_user(user.id)
            .await?
            .ok_or_else(|| AppError::internal("User missing after insert"))
    }

    /// Get user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    /// Get user by normalized (lower-cased) email
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    /// Activate or deactivate an account
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist
    pub async fn set_user_active(&self, user_id: Uuid, active: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET is_active = $1 WHERE id = $2")
            .bind(active)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User"));
        }
        Ok(())
    }

    /// Awards of one kind for a user, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query or row decoding fails
    pub async fn list_awards(&self, user_id: Uuid, kind: AwardKind) -> AppResult<Vec<Award>> {
        let rows = sqlx::query(
            r"
            SELECT kind, name, details, icon, category, awarded_at
            FROM user_awards
            WHERE user_id = $1 AND kind = $2
            ORDER BY id ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_award).collect()
    }

    /// Number of awards of one kind held by a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_awards(&self, user_id: Uuid, kind: AwardKind) -> AppResult<u32> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_awards WHERE user_id = $1 AND kind = $2")
                .bind(user_id.to_string())
                .bind(kind.as_str())
                .fetch_one(&self.pool)
                .await?;
        decode_u32(count, "award count")
    }
}

/// Append an award inside an open transaction
pub(super) async fn insert_award(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: Uuid,
    award: &Award,
) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT INTO user_awards (user_id, kind, name, details, icon, category, awarded_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(user_id.to_string())
    .bind(award.kind.as_str())
    .bind(&award.name)
    .bind(&award.details)
    .bind(&award.icon)
    .bind(&award.category)
    .bind(encode_timestamp(award.awarded_at))
    .execute(&mut **tx)
    .await?;
    Ok(())
}

fn u32_column(row: &SqliteRow, column: &str) -> AppResult<u32> {
    decode_u32(row.try_get(column)?, column)
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.try_get("id")?;
    let goals: String = row.try_get("fitness_goals")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(User {
        id: decode_uuid(&id)?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        profile: UserProfile {
            full_name: row.try_get("full_name")?,
            age: u32_column(row, "age")?,
            gender: row.try_get("gender")?,
            weight: row.try_get("weight")?,
            height: row.try_get("height")?,
            fitness_level: row.try_get("fitness_level")?,
            fitness_goals: serde_json::from_str(&goals)?,
            medical_conditions: row.try_get("medical_conditions")?,
            preferred_units: row.try_get("preferred_units")?,
            target_weight: row.try_get("target_weight")?,
        },
        level: u32_column(row, "level")?,
        experience: u32_column(row, "experience")?,
        is_active: row.try_get("is_active")?,
        is_admin: row.try_get("is_admin")?,
        profile_complete: row.try_get("profile_complete")?,
        created_at: decode_timestamp(&created_at)?,
    })
}

fn row_to_award(row: &SqliteRow) -> AppResult<Award> {
    let kind: String = row.try_get("kind")?;
    let awarded_at: String = row.try_get("awarded_at")?;
    Ok(Award {
        kind: AwardKind::parse(&kind)
            .ok_or_else(|| AppError::database(format!("Unknown award kind {kind:?}")))?,
        name: row.try_get("name")?,
        details: row.try_get("details")?,
        icon: row.try_get("icon")?,
        category: row.try_get("category")?,
        awarded_at: decode_timestamp(&awarded_at)?,
    })
}
