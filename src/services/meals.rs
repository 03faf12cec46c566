// ABOUTME: Meal plan generation and history for a user's stored preferences
// ABOUTME: Bridges the stored preference record, the plan generator, and plan persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use chrono::{DateTime, Duration, Utc};
use companion_core::constants::error_messages::PREFERENCES_REQUIRED;
use companion_core::constants::history::MEAL_PLAN_HISTORY_DAYS;
use companion_core::errors::{AppError, AppResult};
use companion_core::models::{MealPreferences, MealRecord};
use companion_intelligence::MealPlanGenerator;
use uuid::Uuid;

use crate::database::Database;
use crate::models::GeneratedMealPlan;

async fn required_preferences(database: &Database, user_id: Uuid) -> AppResult<MealPreferences> {
    database
        .get_preferences(user_id)
        .await?
        .map(|stored| stored.preferences)
        .ok_or_else(|| AppError::precondition_failed(PREFERENCES_REQUIRED))
}

/// Generate and store a plan from the caller's saved preferences
///
/// # Errors
///
/// Returns `PreconditionFailed` when no preferences are saved, or a storage error
pub async fn generate_for_user(
    database: &Database,
    generator: &MealPlanGenerator,
    user_id: Uuid,
) -> AppResult<GeneratedMealPlan> {
    let preferences = required_preferences(database, user_id).await?;
    let plan = generator.generate(&preferences);
    database.insert_generated_plan(user_id, &plan).await
}

/// Meals strictly matching the caller's saved preferences
///
/// # Errors
///
/// Returns `PreconditionFailed` when no preferences are saved
pub async fn available_for_user(
    database: &Database,
    generator: &MealPlanGenerator,
    user_id: Uuid,
) -> AppResult<Vec<MealRecord>> {
    let preferences = required_preferences(database, user_id).await?;
    Ok(generator.available_meals(&preferences))
}

/// Plans generated within the history window ending at `now`, newest first
///
/// # Errors
///
/// Returns an error if plans cannot be loaded
pub async fn recent_plans(
    database: &Database,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Vec<GeneratedMealPlan>> {
    let since = now - Duration::days(MEAL_PLAN_HISTORY_DAYS);
    database.list_generated_plans_since(user_id, since).await
}
