// ABOUTME: Maps selected candidate indices to a labeled breakfast/lunch/dinner plan
// ABOUTME: Out-of-range indices and empty candidate lists fall back to the placeholder meal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use chrono::{DateTime, Utc};
use companion_core::models::{MealPlan, MealRecord};

use super::selector::MealIndices;

fn meal_at(candidates: &[&MealRecord], index: usize) -> MealRecord {
    candidates
        .get(index)
        .map_or_else(MealRecord::placeholder, |meal| (*meal).clone())
}

/// Build a plan stamped with the current time
#[must_use]
pub fn format_plan(indices: MealIndices, candidates: &[&MealRecord]) -> MealPlan {
    format_plan_at(indices, candidates, Utc::now())
}

/// Build a plan with an explicit generation timestamp
#[must_use]
pub fn format_plan_at(
    indices: MealIndices,
    candidates: &[&MealRecord],
    generated_at: DateTime<Utc>,
) -> MealPlan {
    let [breakfast, lunch, dinner] = indices;
    MealPlan {
        breakfast: meal_at(candidates, breakfast),
        lunch: meal_at(candidates, lunch),
        dinner: meal_at(candidates, dinner),
        generated_at,
    }
}
