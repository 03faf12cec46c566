// ABOUTME: Registered user account with fitness profile and progression state
// ABOUTME: Serializes without the password hash for the profile endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use chrono::{DateTime, Utc};
use companion_core::constants::progression::STARTING_LEVEL;
use companion_intelligence::BodyMeasurements;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fitness profile captured at registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub full_name: String,
    /// Age in years
    pub age: u32,
    /// Free-text gender
    pub gender: String,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    /// Self-reported fitness level
    pub fitness_level: String,
    /// Selected fitness goals (at least one)
    pub fitness_goals: Vec<String>,
    /// Free-text medical notes
    pub medical_conditions: String,
    /// `metric` or `imperial`
    pub preferred_units: String,
    /// Optional target weight
    pub target_weight: Option<f64>,
}

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Lower-cased email address
    pub email: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Fitness profile
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Current level
    pub level: u32,
    /// Total experience
    pub experience: u32,
    /// Deactivated accounts cannot log in
    pub is_active: bool,
    /// Set for the first account ever registered
    pub is_admin: bool,
    /// Whether registration captured a full profile
    pub profile_complete: bool,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// New active account at the starting level; admin status is decided on insert
    #[must_use]
    pub fn new(email: String, password_hash: String, profile: UserProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            profile,
            level: STARTING_LEVEL,
            experience: 0,
            is_active: true,
            is_admin: false,
            profile_complete: true,
            created_at: Utc::now(),
        }
    }

    /// Inputs for BMI and body-fat calculations
    #[must_use]
    pub fn body_measurements(&self) -> BodyMeasurements {
        BodyMeasurements {
            weight: self.profile.weight,
            height: self.profile.height,
            age: self.profile.age,
            gender: self.profile.gender.clone(),
        }
    }
}
