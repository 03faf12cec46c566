// ABOUTME: Persisted data models plus re-exports of the shared domain models
// ABOUTME: Users, stored preferences, saved meal plans, and joined challenges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! # Data Models
//!
//! Records owned by the server's database. Domain types shared with the
//! computation engine (meal records, plans, awards, challenge definitions)
//! come from `companion-core` and are re-exported here.

/// Joined challenges and their API views
pub mod challenges;
/// Generated plans and manual meal-plan entries
pub mod meal_plans;
/// Stored meal preferences
pub mod preferences;
/// Registered users
pub mod user;

pub use challenges::{ChallengeStatus, UserChallenge, UserChallengeView};
pub use companion_core::models::*;
pub use meal_plans::{GeneratedMealPlan, MealPlanEntry, NewMealPlanEntry};
pub use preferences::StoredPreferences;
pub use user::{User, UserProfile};
