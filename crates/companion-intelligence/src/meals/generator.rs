// ABOUTME: End-to-end meal plan generation from stored preferences
// ABOUTME: Runs filter, fallback, evolutionary selection, and formatting against one catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use companion_core::models::{MealPlan, MealPreferences, MealRecord};
use rand::Rng;
use tracing::{debug, warn};

use super::catalog::MealCatalog;
use super::filter::{candidates_for, filter_by_preferences};
use super::formatter::format_plan;
use super::selector::EvolutionarySelector;

/// Long-lived generator owning the immutable catalog
///
/// Holds no mutable state, so one instance is shared across request handlers.
#[derive(Debug, Clone, Default)]
pub struct MealPlanGenerator {
    catalog: MealCatalog,
    selector: EvolutionarySelector,
}

impl MealPlanGenerator {
    /// Create a generator over `catalog`
    #[must_use]
    pub const fn new(catalog: MealCatalog, selector: EvolutionarySelector) -> Self {
        Self { catalog, selector }
    }

    /// Catalog in use
    #[must_use]
    pub const fn catalog(&self) -> &MealCatalog {
        &self.catalog
    }

    /// Generate a plan using the thread-local RNG
    #[must_use]
    pub fn generate(&self, preferences: &MealPreferences) -> MealPlan {
        self.generate_with_rng(preferences, &mut rand::thread_rng())
    }

    /// Generate a plan with a caller-supplied RNG
    pub fn generate_with_rng<R>(&self, preferences: &MealPreferences, rng: &mut R) -> MealPlan
    where
        R: Rng + ?Sized,
    {
        let candidates = candidates_for(&self.catalog, preferences);
        let indices = self
            .selector
            .select(&candidates, &preferences.fitness_goal, rng);
        let plan = format_plan(indices, &candidates);

        if plan.is_all_placeholder() {
            warn!(
                age_group = %preferences.age_group,
                dietary_preference = %preferences.dietary_preference,
                fitness_goal = %preferences.fitness_goal,
                "No catalog meals match preferences, plan holds placeholders only"
            );
        } else {
            debug!(
                candidates = candidates.len(),
                breakfast = %plan.breakfast.name,
                lunch = %plan.lunch.name,
                dinner = %plan.dinner.name,
                "Generated meal plan"
            );
        }
        plan
    }

    /// Strict filter output for `preferences`, without the fallback
    #[must_use]
    pub fn available_meals(&self, preferences: &MealPreferences) -> Vec<MealRecord> {
        filter_by_preferences(&self.catalog, preferences)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_meals_come_from_candidates() {
        let generator = MealPlanGenerator::default();
        let prefs = MealPreferences::new("adult", "vegetarian", "stay_fit");
        let allowed = generator.available_meals(&prefs);
        let mut rng = StdRng::seed_from_u64(99);

        let plan = generator.generate_with_rng(&prefs, &mut rng);
        for meal in plan.meals() {
            assert!(allowed.contains(meal), "{} not in filtered set", meal.name);
        }
    }

    #[test]
    fn test_unknown_goal_degrades_to_placeholders() {
        let generator = MealPlanGenerator::default();
        let prefs = MealPreferences::new("adult", "vegetarian", "marathon");
        assert!(generator.generate(&prefs).is_all_placeholder());
    }
}
