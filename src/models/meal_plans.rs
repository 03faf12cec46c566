// ABOUTME: Saved generated meal plans and manually entered meal-plan entries
// ABOUTME: Generated plans feed the history view; manual entries are per-day CRUD records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use chrono::{DateTime, NaiveDate, Utc};
use companion_core::models::MealPlan;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated plan persisted for history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMealPlan {
    /// Saved plan identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// When the plan was saved
    pub date: DateTime<Utc>,
    /// Breakfast, lunch, dinner, and generation time
    #[serde(flatten)]
    pub plan: MealPlan,
}

/// Fields for a new manual entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewMealPlanEntry {
    /// Slot label such as `breakfast` or `snack`
    pub meal_type: String,
    /// Free-text meal name
    pub meal_name: String,
    /// Positive serving count or weight
    pub quantity: f64,
    /// Day the entry belongs to
    pub date: NaiveDate,
}

/// A manually entered meal for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    /// Entry identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Slot label
    pub meal_type: String,
    /// Meal name
    pub meal_name: String,
    /// Quantity
    pub quantity: f64,
    /// Day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Creation time
    pub created_at: DateTime<Utc>,
}
