// ABOUTME: Computation engine for meal planning, health metrics, progression, and challenges
// ABOUTME: Pure functions and immutable catalogs with no I/O; persistence lives in the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

#![deny(unsafe_code)]

//! # Companion Intelligence
//!
//! Everything the server computes rather than stores:
//!
//! - **meals**: catalog, preference filtering, evolutionary selection, plan formatting
//! - **`health_metrics`**: BMI and body-fat estimates with category labels
//! - **progression**: experience grants, level thresholds, and award construction
//! - **challenges**: the fixed challenge catalog and daily progress maps

/// Fixed challenge catalog and progress tracking helpers
pub mod challenges;
/// BMI and body-fat percentage calculations
pub mod health_metrics;
/// Meal catalog, filtering, selection, and plan generation
pub mod meals;
/// Experience and level progression rules
pub mod progression;

pub use health_metrics::{BmiCategory, BodyFatCategory, BodyMeasurements, HealthMetrics};
pub use meals::{
    EvolutionarySelector, MealCatalog, MealIndices, MealPlanGenerator, SearchParameters,
};
pub use progression::ProgressionOutcome;
