// ABOUTME: SQLite persistence for users, awards, preferences, meal plans, and challenges
// ABOUTME: Owns the connection pool and runs idempotent schema migrations at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! # Database Management
//!
//! One [`Database`] wraps the `SQLite` pool; operations are split across
//! submodules by table family. Timestamps are stored as fixed-width RFC 3339
//! text (microseconds, `Z` suffix) so string comparison matches time order.
//! List-valued columns (fitness goals, challenge progress) hold JSON.

mod challenges;
mod meal_plans;
mod preferences;
mod users;

pub use challenges::{ChallengeCompletion, DayCompletion};

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use companion_core::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::info;
use uuid::Uuid;

use crate::config::{DatabaseConfig, DatabaseUrl};

/// Database manager for all persisted records
#[derive(Clone, Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the connection
    /// fails, or a migration fails
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        if let DatabaseUrl::SQLite { path } = &config.url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::config(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&config.url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.pool_size());
        if config.url.is_memory() {
            // Dropping the only connection would drop the database
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %config.url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_preferences().await?;
        self.migrate_meal_plans().await?;
        self.migrate_challenges().await?;
        Ok(())
    }
}

/// Canonical storage form for timestamps
pub(crate) fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp
pub(crate) fn decode_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp {raw:?}: {e}")))
}

/// Narrow a stored integer column
pub(crate) fn decode_u32(raw: i64, column: &str) -> AppResult<u32> {
    u32::try_from(raw).map_err(|e| AppError::database(format!("Invalid {column} value {raw}: {e}")))
}

/// Parse a stored identifier
pub(crate) fn decode_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| AppError::database(format!("Invalid stored id {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encoded_timestamps_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2025, 1, 9, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        assert!(encode_timestamp(earlier) < encode_timestamp(later));
        assert_eq!(encode_timestamp(later), "2025-01-10T00:00:00.000000Z");
    }

    #[test]
    fn test_timestamp_round_trip() {
        let now = Utc::now();
        let decoded = decode_timestamp(&encode_timestamp(now)).unwrap();
        assert_eq!(decoded.timestamp_micros(), now.timestamp_micros());
    }
}
