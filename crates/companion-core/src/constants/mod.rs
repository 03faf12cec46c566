// ABOUTME: Application-wide constants for meal search, progression, auth, and formatting
// ABOUTME: Groups tunables by domain so engine and server code share one source of truth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! # Constants Module
//!
//! Hardcoded constants grouped by domain. Environment-driven settings live in
//! the server's configuration module instead.

/// Parameters of the evolutionary meal search and candidate filtering
pub mod meal_search {
    /// Individuals per generation
    pub const POPULATION_SIZE: usize = 50;
    /// Generations evolved before the best individual is returned
    pub const GENERATIONS: usize = 100;
    /// Probability that an offspring receives a point mutation
    pub const MUTATION_RATE: f64 = 0.1;
    /// Members sampled per tournament
    pub const TOURNAMENT_SIZE: usize = 3;
    /// Meals per plan (breakfast, lunch, dinner)
    pub const MEALS_PER_PLAN: usize = 3;
    /// Strict matches required before the relaxed fallback filter engages
    pub const MIN_STRICT_MATCHES: usize = 3;
    /// Maximum records returned by the relaxed fallback filter
    pub const FALLBACK_LIMIT: usize = 9;

    /// Score every individual starts from
    pub const BASE_FITNESS: f64 = 100.0;
    /// Bonus when all three meal indices are distinct
    pub const VARIETY_BONUS: f64 = 20.0;
    /// Goal bonus for `weight_loss` and `weight_gain`
    pub const TARGETED_GOAL_BONUS: f64 = 15.0;
    /// Goal bonus for every other goal
    pub const MAINTENANCE_GOAL_BONUS: f64 = 10.0;

    /// Name of the meal substituted for missing or out-of-range selections
    pub const PLACEHOLDER_MEAL_NAME: &str = "Default Meal";
}

/// Experience, levels, and award presentation
pub mod progression {
    /// Level assigned to new accounts
    pub const STARTING_LEVEL: u32 = 1;
    /// Experience needed per level: a user at level `n` levels up at `n * XP_PER_LEVEL`
    pub const XP_PER_LEVEL: u32 = 100;
    /// Experience granted when a completed challenge is missing from the catalog
    pub const DEFAULT_CHALLENGE_XP: u32 = 100;

    /// Badge awarded for completing any challenge
    pub const CHALLENGE_BADGE_NAME: &str = "Challenge Master";
    /// Badge description
    pub const CHALLENGE_BADGE_DETAILS: &str = "Completed a fitness challenge";
    /// Badge icon
    pub const CHALLENGE_BADGE_ICON: &str = "🏆";
    /// Badge category
    pub const CHALLENGE_BADGE_CATEGORY: &str = "challenge";

    /// Milestone icon for level-ups
    pub const LEVEL_MILESTONE_ICON: &str = "⭐";
    /// Milestone category for level-ups
    pub const LEVEL_MILESTONE_CATEGORY: &str = "level";
}

/// Authentication and registration limits
pub mod auth {
    /// Default bearer token lifetime in days
    pub const DEFAULT_TOKEN_EXPIRY_DAYS: i64 = 7;
    /// Minimum password length
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Youngest accepted registration age
    pub const MIN_AGE: u32 = 13;
    /// Oldest accepted registration age
    pub const MAX_AGE: u32 = 120;
    /// Unit system used when registration omits one
    pub const DEFAULT_PREFERRED_UNITS: &str = "metric";
    /// `Authorization` header scheme prefix
    pub const BEARER_PREFIX: &str = "Bearer ";
}

/// History windows
pub mod history {
    /// Generated meal plans older than this many days are excluded from history
    pub const MEAL_PLAN_HISTORY_DAYS: i64 = 7;
}

/// Date and time formats
pub mod formats {
    /// Calendar day format used for meal-plan dates and challenge progress keys
    pub const DAY_FORMAT: &str = "%Y-%m-%d";
}

/// User-facing error messages shared by services and routes
pub mod error_messages {
    /// Login with unknown email or wrong password
    pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
    /// Login to a deactivated account
    pub const ACCOUNT_DEACTIVATED: &str = "Account is deactivated";
    /// Meal endpoints called before preferences exist
    pub const PREFERENCES_REQUIRED: &str = "Please set your preferences first";
    /// Health metrics requested for an incomplete profile
    pub const INCOMPLETE_HEALTH_DATA: &str = "Incomplete user data for calculations";
    /// Email already registered
    pub const EMAIL_TAKEN: &str = "Email already registered";
}
