// ABOUTME: Shared domain models used by the meal engine and the HTTP server
// ABOUTME: Meal records and plans, challenge definitions, and award records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

/// Award (badge and milestone) records
pub mod award;
/// Fixed-catalog challenge definitions
pub mod challenge;
/// Meal tags, records, preferences, and generated plans
pub mod meal;

pub use award::{Award, AwardKind};
pub use challenge::{ChallengeDefinition, ChallengeDifficulty, ChallengeKind};
pub use meal::{MealPlan, MealPreferences, MealRecord, MealSlot, MealTag};
