// ABOUTME: Immutable catalog of tagged meal records loaded once at startup
// ABOUTME: The standard catalog ships breakfast, lunch, dinner, and no-sugar options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use companion_core::models::{MealRecord, MealTag};

use MealTag::{
    Adult, NoSugar, NonVegetarian, Older, StayFit, Vegetarian, WeightGain, WeightLoss, Young,
};

/// Read-only list of meals available for selection
///
/// Constructed explicitly and shared by reference (typically behind an `Arc`),
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealCatalog {
    meals: Vec<MealRecord>,
}

impl MealCatalog {
    /// Build a catalog from arbitrary records, preserving their order
    #[must_use]
    pub const fn new(meals: Vec<MealRecord>) -> Self {
        Self { meals }
    }

    /// The catalog the service ships with
    #[must_use]
    pub fn standard() -> Self {
        let entries: &[(&str, &[MealTag])] = &[
            ("Fruits and Nuts", &[Vegetarian, WeightLoss, Adult, Young]),
            ("Egg Omelette with Vegetables", &[NonVegetarian, WeightLoss, Adult, Young]),
            ("Greek Yogurt with Berries", &[Vegetarian, WeightLoss, Adult, Young]),
            ("Toast with coffee", &[Vegetarian, WeightLoss, Adult, Young]),
            ("Protein Smoothie Bowl", &[Vegetarian, WeightGain, Adult, Young]),
            ("Idli with Sambar", &[Vegetarian, StayFit, Adult, Older]),
            ("Dosa with Coconut Chutney", &[Vegetarian, StayFit, Adult, Older]),
            ("Poha with Peanuts", &[Vegetarian, StayFit, Adult, Older]),
            ("Upma with Vegetables", &[Vegetarian, WeightLoss, Adult, Older]),
            ("Besan Chilla", &[Vegetarian, WeightLoss, Adult, Young]),
            ("Moong Dal Khichdi", &[Vegetarian, WeightLoss, Adult, Older]),
            ("Roti with Sabzi", &[Vegetarian, WeightLoss, Adult]),
            ("Lau Chingri", &[Vegetarian, WeightLoss, Adult]),
            ("Grilled Chicken with Quinoa", &[NonVegetarian, WeightLoss, Adult, Young]),
            ("Fish, Brown Rice", &[NonVegetarian, WeightLoss, Adult, Young]),
            ("Tofu Stir Fry with Brown Rice", &[Vegetarian, WeightLoss, Adult, Young]),
            ("Dal Makhani with Jeera Rice", &[Vegetarian, WeightGain, Adult, Young]),
            ("Paneer Tikka with Naan", &[Vegetarian, WeightGain, Adult, Young]),
            ("Rajma Chawal", &[Vegetarian, StayFit, Adult, Older]),
            ("Mixed Vegetable Curry with Roti", &[Vegetarian, StayFit, Adult, Older]),
            ("Grilled Fish with Steamed Vegetables", &[NonVegetarian, WeightLoss, Adult, Young]),
            ("Lentil Soup with Whole Grain Bread", &[Vegetarian, WeightLoss, Adult, Older]),
            ("Chicken Breast with Sweet Potato", &[NonVegetarian, WeightLoss, Adult, Young]),
            ("Quinoa Bowl with Chickpeas", &[Vegetarian, WeightLoss, Adult, Young]),
            ("Lean Beef with Broccoli", &[NonVegetarian, WeightGain, Adult, Young]),
            ("Paneer Bhurji with Roti", &[Vegetarian, WeightGain, Adult, Young]),
            ("Mixed Dal with Brown Rice", &[Vegetarian, StayFit, Adult, Older]),
            ("Vegetable Khichdi", &[Vegetarian, StayFit, Adult, Older]),
            ("Grilled Tofu with Vegetables", &[Vegetarian, WeightLoss, Adult, Older]),
            ("Egg Curry with Roti", &[NonVegetarian, StayFit, Adult, Older]),
            ("Steamed Fish with Herbs", &[NonVegetarian, WeightLoss, Adult, Young, NoSugar]),
            ("Grilled Chicken with Asparagus", &[NonVegetarian, WeightLoss, Adult, Young, NoSugar]),
            ("Spinach and Mushroom Omelette", &[Vegetarian, WeightLoss, Adult, Young, NoSugar]),
            ("Avocado and Egg Bowl", &[Vegetarian, WeightLoss, Adult, Young, NoSugar]),
            ("Cottage Cheese with Nuts", &[Vegetarian, WeightLoss, Adult, Older, NoSugar]),
            ("Steamed Vegetables with Tofu", &[Vegetarian, WeightLoss, Adult, Older, NoSugar]),
            ("Mutton with Rice", &[NonVegetarian, WeightGain, Adult, Young]),
            ("Mutton with Roti", &[NonVegetarian, WeightGain, Adult, Young]),
            ("Rui and Rice", &[NonVegetarian, WeightGain, Adult, Young]),
        ];

        Self::new(
            entries
                .iter()
                .map(|(name, tags)| MealRecord::new(*name, tags))
                .collect(),
        )
    }

    /// All records in catalog order
    #[must_use]
    pub fn meals(&self) -> &[MealRecord] {
        &self.meals
    }

    /// Iterate over records in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, MealRecord> {
        self.meals.iter()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    /// Whether the catalog has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

impl Default for MealCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a MealCatalog {
    type Item = &'a MealRecord;
    type IntoIter = std::slice::Iter<'a, MealRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
