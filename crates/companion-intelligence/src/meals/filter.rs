// ABOUTME: Preference filter over the meal catalog plus the relaxed fallback filter
// ABOUTME: Strict filter matches age, diet, and goal; fallback drops age and caps the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use companion_core::constants::meal_search::{FALLBACK_LIMIT, MIN_STRICT_MATCHES};
use companion_core::models::{MealPreferences, MealRecord, MealTag};

use super::catalog::MealCatalog;

/// Dietary preference value that additionally requires the `no_sugar` tag
///
/// Only reachable when a caller stores this literal as the dietary preference,
/// which bypasses the vegetarian/non-vegetarian constraint entirely.
const NO_SUGAR_PREFERENCE: &str = "no_sugar";

fn satisfies_diet(meal: &MealRecord, dietary_preference: &str) -> bool {
    match MealTag::parse(dietary_preference) {
        Some(MealTag::Vegetarian) => !meal.has_tag(MealTag::NonVegetarian),
        Some(MealTag::NonVegetarian) => !meal.has_tag(MealTag::Vegetarian),
        _ => true,
    }
}

fn satisfies_goal(meal: &MealRecord, fitness_goal: &str) -> bool {
    meal.has_tag_named(fitness_goal)
}

/// Records matching age group, dietary preference, and fitness goal, in catalog order
///
/// Unknown preference values never raise: an unrecognized age group or goal
/// simply matches nothing.
#[must_use]
pub fn filter_by_preferences<'a>(
    catalog: &'a MealCatalog,
    preferences: &MealPreferences,
) -> Vec<&'a MealRecord> {
    catalog
        .iter()
        .filter(|meal| meal.has_tag_named(&preferences.age_group))
        .filter(|meal| satisfies_diet(meal, &preferences.dietary_preference))
        .filter(|meal| satisfies_goal(meal, &preferences.fitness_goal))
        .filter(|meal| {
            preferences.dietary_preference != NO_SUGAR_PREFERENCE
                || meal.has_tag(MealTag::NoSugar)
        })
        .collect()
}

/// Relaxed filter: dietary and goal constraints only, first [`FALLBACK_LIMIT`] records
#[must_use]
pub fn fallback_candidates<'a>(
    catalog: &'a MealCatalog,
    preferences: &MealPreferences,
) -> Vec<&'a MealRecord> {
    catalog
        .iter()
        .filter(|meal| satisfies_diet(meal, &preferences.dietary_preference))
        .filter(|meal| satisfies_goal(meal, &preferences.fitness_goal))
        .take(FALLBACK_LIMIT)
        .collect()
}

/// Strict filter, replaced by the fallback when it yields fewer than
/// [`MIN_STRICT_MATCHES`] records
#[must_use]
pub fn candidates_for<'a>(
    catalog: &'a MealCatalog,
    preferences: &MealPreferences,
) -> Vec<&'a MealRecord> {
    let strict = filter_by_preferences(catalog, preferences);
    if strict.len() >= MIN_STRICT_MATCHES {
        return strict;
    }
    tracing::debug!(
        strict_matches = strict.len(),
        age_group = %preferences.age_group,
        "Too few strict matches, relaxing age constraint"
    );
    fallback_candidates(catalog, preferences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use MealTag::{Adult, NoSugar, NonVegetarian, Older, StayFit, Vegetarian, WeightLoss, Young};

    fn names(meals: &[&MealRecord]) -> Vec<String> {
        meals.iter().map(|meal| meal.name.clone()).collect()
    }

    #[test]
    fn test_strict_filter_matches_all_three_constraints() {
        let catalog = MealCatalog::standard();
        let prefs = MealPreferences::new("older", "vegetarian", "stay_fit");
        let meals = filter_by_preferences(&catalog, &prefs);

        assert!(!meals.is_empty());
        for meal in &meals {
            assert!(meal.has_tag(Older));
            assert!(meal.has_tag(StayFit));
            assert!(!meal.has_tag(NonVegetarian));
        }
    }

    #[test]
    fn test_strict_filter_is_idempotent_and_ordered() {
        let catalog = MealCatalog::standard();
        let prefs = MealPreferences::new("young", "non_vegetarian", "weight_loss");
        let first = names(&filter_by_preferences(&catalog, &prefs));
        let second = names(&filter_by_preferences(&catalog, &prefs));
        assert_eq!(first, second);

        let catalog_order: Vec<String> = catalog
            .iter()
            .filter(|meal| first.contains(&meal.name))
            .map(|meal| meal.name.clone())
            .collect();
        assert_eq!(first, catalog_order);
    }

    #[test]
    fn test_unconstrained_diet_admits_both_classes() {
        let catalog = MealCatalog::standard();
        let prefs = MealPreferences::new("adult", "flexitarian", "weight_loss");
        let meals = filter_by_preferences(&catalog, &prefs);
        assert!(meals.iter().any(|meal| meal.has_tag(Vegetarian)));
        assert!(meals.iter().any(|meal| meal.has_tag(NonVegetarian)));
    }

    #[test]
    fn test_no_sugar_preference_requires_marker() {
        let catalog = MealCatalog::standard();
        let prefs = MealPreferences::new("adult", "no_sugar", "weight_loss");
        let meals = filter_by_preferences(&catalog, &prefs);
        assert_eq!(meals.len(), 6);
        assert!(meals.iter().all(|meal| meal.has_tag(NoSugar)));
    }

    #[test]
    fn test_fallback_drops_age_and_caps_result() {
        let catalog = MealCatalog::standard();
        let prefs = MealPreferences::new("teen", "vegetarian", "weight_loss");
        assert!(filter_by_preferences(&catalog, &prefs).is_empty());

        let fallback = candidates_for(&catalog, &prefs);
        assert_eq!(fallback.len(), FALLBACK_LIMIT);
        assert!(fallback
            .iter()
            .all(|meal| meal.has_tag(WeightLoss) && !meal.has_tag(NonVegetarian)));
        assert_eq!(fallback[0].name, "Fruits and Nuts");
    }

    #[test]
    fn test_fallback_ignores_no_sugar_branch() {
        let catalog = MealCatalog::new(vec![
            MealRecord::new("Plain", &[Vegetarian, WeightLoss, Adult]),
            MealRecord::new("Sugar Free", &[Vegetarian, WeightLoss, Young, NoSugar]),
        ]);
        let prefs = MealPreferences::new("older", "no_sugar", "weight_loss");
        let fallback = candidates_for(&catalog, &prefs);
        assert_eq!(names(&fallback), vec!["Plain", "Sugar Free"]);
    }

    #[test]
    fn test_strict_result_kept_when_large_enough() {
        let catalog = MealCatalog::standard();
        let prefs = MealPreferences::new("adult", "vegetarian", "stay_fit");
        assert_eq!(
            names(&candidates_for(&catalog, &prefs)),
            names(&filter_by_preferences(&catalog, &prefs))
        );
    }

    #[test]
    fn test_unknown_goal_yields_no_candidates() {
        let catalog = MealCatalog::standard();
        let prefs = MealPreferences::new("adult", "vegetarian", "bulk_up");
        assert!(candidates_for(&catalog, &prefs).is_empty());
    }
}
