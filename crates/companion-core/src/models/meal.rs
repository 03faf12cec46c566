// ABOUTME: Meal catalog record, tag vocabulary, preference triple, and generated meal plan
// ABOUTME: Tags serialize as the snake_case strings stored in the catalog and persisted plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::meal_search::PLACEHOLDER_MEAL_NAME;

/// Fixed tag vocabulary attached to catalog meals
///
/// Dietary class, goal class, and age class. Most records carry both the broad
/// `adult` bucket and one finer age bucket (`young` or `older`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealTag {
    /// Contains no meat or fish
    Vegetarian,
    /// Contains meat, fish, or eggs
    NonVegetarian,
    /// Suited to a calorie deficit
    WeightLoss,
    /// Suited to a calorie surplus
    WeightGain,
    /// Suited to maintenance
    StayFit,
    /// Finer age bucket for younger adults
    Young,
    /// Finer age bucket for older adults
    Older,
    /// Broad adult age bucket
    Adult,
    /// Prepared without added sugar
    NoSugar,
}

impl MealTag {
    /// Every tag, in declaration order
    pub const ALL: [Self; 9] = [
        Self::Vegetarian,
        Self::NonVegetarian,
        Self::WeightLoss,
        Self::WeightGain,
        Self::StayFit,
        Self::Young,
        Self::Older,
        Self::Adult,
        Self::NoSugar,
    ];

    /// Wire and storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::NonVegetarian => "non_vegetarian",
            Self::WeightLoss => "weight_loss",
            Self::WeightGain => "weight_gain",
            Self::StayFit => "stay_fit",
            Self::Young => "young",
            Self::Older => "older",
            Self::Adult => "adult",
            Self::NoSugar => "no_sugar",
        }
    }

    /// Parse an exact tag name; anything outside the vocabulary is `None`
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl Display for MealTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A named meal and its tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealRecord {
    /// Display name
    pub name: String,
    /// Tag set (the placeholder meal has none)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<MealTag>,
}

impl MealRecord {
    /// Create a meal record
    pub fn new(name: impl Into<String>, tags: &[MealTag]) -> Self {
        Self {
            name: name.into(),
            tags: tags.to_vec(),
        }
    }

    /// The `Default Meal` stand-in used when no candidate is available
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_MEAL_NAME.to_owned(),
            tags: Vec::new(),
        }
    }

    /// Whether this record is the placeholder stand-in
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.tags.is_empty() && self.name == PLACEHOLDER_MEAL_NAME
    }

    /// Whether the record carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: MealTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether the record carries a tag spelled exactly `name`
    ///
    /// Names outside the vocabulary never match.
    #[must_use]
    pub fn has_tag_named(&self, name: &str) -> bool {
        MealTag::parse(name).is_some_and(|tag| self.has_tag(tag))
    }
}

/// The user's stored preference triple that drives meal filtering
///
/// Values are kept as free text: unknown values are not rejected, they simply
/// match nothing in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPreferences {
    /// Age bucket (`young`, `older`, `adult`)
    pub age_group: String,
    /// Dietary preference (`vegetarian`, `non_vegetarian`, anything else is unconstrained)
    pub dietary_preference: String,
    /// Fitness goal (`weight_loss`, `weight_gain`, `stay_fit`)
    pub fitness_goal: String,
}

impl MealPreferences {
    /// Create a preference triple
    pub fn new(
        age_group: impl Into<String>,
        dietary_preference: impl Into<String>,
        fitness_goal: impl Into<String>,
    ) -> Self {
        Self {
            age_group: age_group.into(),
            dietary_preference: dietary_preference.into(),
            fitness_goal: fitness_goal.into(),
        }
    }
}

/// Labeled slot within a daily plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// First slot
    Breakfast,
    /// Second slot
    Lunch,
    /// Third slot
    Dinner,
}

/// A generated breakfast/lunch/dinner plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    /// Breakfast meal
    pub breakfast: MealRecord,
    /// Lunch meal
    pub lunch: MealRecord,
    /// Dinner meal
    pub dinner: MealRecord,
    /// When the plan was generated
    pub generated_at: DateTime<Utc>,
}

impl MealPlan {
    /// Meal assigned to `slot`
    #[must_use]
    pub const fn meal(&self, slot: MealSlot) -> &MealRecord {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Meals in slot order
    #[must_use]
    pub const fn meals(&self) -> [&MealRecord; 3] {
        [&self.breakfast, &self.lunch, &self.dinner]
    }

    /// True when every slot holds the placeholder, which signals a
    /// preference/catalog mismatch worth surfacing to the user
    #[must_use]
    pub fn is_all_placeholder(&self) -> bool {
        self.meals().iter().all(|meal| meal.is_placeholder())
    }
}
