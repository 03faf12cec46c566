// ABOUTME: Per-user stored meal preferences with creation and update timestamps
// ABOUTME: One record per user; saving again replaces the triple and bumps updated_at
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use chrono::{DateTime, Utc};
use companion_core::models::MealPreferences;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's saved preference triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreferences {
    /// Record identifier, stable across updates
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Age group, dietary preference, fitness goal
    #[serde(flatten)]
    pub preferences: MealPreferences,
    /// First save
    pub created_at: DateTime<Utc>,
    /// Most recent save
    pub updated_at: DateTime<Utc>,
}
