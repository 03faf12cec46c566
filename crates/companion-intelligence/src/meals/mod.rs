// ABOUTME: Meal plan pipeline: catalog, preference filter, evolutionary selector, formatter
// ABOUTME: Filter output feeds the selector, whose index triple the formatter maps to meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! # Meals
//!
//! Control flow for one plan: [`filter::filter_by_preferences`] →
//! ([`filter::fallback_candidates`] when fewer than three strict matches) →
//! [`EvolutionarySelector::select`] → [`formatter::format_plan`].
//! Nothing here holds state across calls beyond the immutable catalog.

/// Immutable meal catalog
pub mod catalog;
/// Preference filter and relaxed fallback
pub mod filter;
/// Index triple to named meal plan mapping
pub mod formatter;
/// End-to-end plan generation
pub mod generator;
/// Population-based index-triple search
pub mod selector;

pub use catalog::MealCatalog;
pub use generator::MealPlanGenerator;
pub use selector::{EvolutionarySelector, MealIndices, SearchParameters};
