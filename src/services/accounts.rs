// ABOUTME: Account registration and login business rules
// ABOUTME: Validates registration fields into a per-field error map and issues bearer tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use crate::auth::{hash_password, verify_password, AuthManager};
use crate::database::Database;
use crate::logging::AppLogger;
use crate::models::{User, UserProfile};
use companion_core::constants::auth::{
    DEFAULT_PREFERRED_UNITS, MAX_AGE, MIN_AGE, MIN_PASSWORD_LENGTH,
};
use companion_core::constants::error_messages::{
    ACCOUNT_DEACTIVATED, EMAIL_TAKEN, INVALID_CREDENTIALS,
};
use companion_core::errors::{AppError, AppResult, ErrorCode};

/// Registration body as sent by clients
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login email
    pub email: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
    /// Display name
    pub full_name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Gender
    pub gender: Option<String>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Self-reported fitness level
    pub fitness_level: Option<String>,
    /// Selected goals
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    /// Free-text medical notes
    pub medical_conditions: Option<String>,
    /// Unit system
    pub preferred_units: Option<String>,
    /// Goal weight
    pub target_weight: Option<f64>,
}

/// Login body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: Option<String>,
    /// Plain-text password
    pub password: Option<String>,
}

/// Registration that passed every field rule
#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    /// Normalized email
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Profile to store
    pub profile: UserProfile,
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok())
        .as_ref()
}

/// Trimmed, lower-cased email
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether `email` has a plausible address shape
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

/// First password rule `password` breaks, if any
#[must_use]
pub fn password_problem(password: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        Some("Password must be at least 8 characters long")
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("Password must contain at least one uppercase letter")
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("Password must contain at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least one number")
    } else {
        None
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Apply every registration rule, collecting one message per failing field
///
/// `email_taken` reports whether the normalized email already has an account.
///
/// # Errors
///
/// Returns the field-to-message map when any rule fails
pub fn validate_registration(
    request: &RegisterRequest,
    email_taken: bool,
) -> Result<ValidatedRegistration, BTreeMap<String, String>> {
    let mut errors = BTreeMap::new();

    let email = request.email.as_deref().map(normalize_email).filter(|e| !e.is_empty());
    match &email {
        None => {
            errors.insert("email".into(), "Email is required".into());
        }
        Some(e) if !is_valid_email(e) => {
            errors.insert("email".into(), "Please enter a valid email address".into());
        }
        Some(_) if email_taken => {
            errors.insert("email".into(), EMAIL_TAKEN.into());
        }
        Some(_) => {}
    }

    let password = request.password.clone().filter(|p| !p.is_empty());
    match password.as_deref().map(password_problem) {
        None => {
            errors.insert("password".into(), "Password is required".into());
        }
        Some(Some(message)) => {
            errors.insert("password".into(), message.into());
        }
        Some(None) => {}
    }

    let full_name = non_empty(request.full_name.as_deref());
    if full_name.is_none() {
        errors.insert("fullName".into(), "Full name is required".into());
    }

    let age = request
        .age
        .filter(|a| (i64::from(MIN_AGE)..=i64::from(MAX_AGE)).contains(a))
        .and_then(|a| u32::try_from(a).ok());
    if age.is_none() {
        errors.insert("age".into(), format!("Please enter a valid age ({MIN_AGE}-{MAX_AGE})"));
    }

    let gender = non_empty(request.gender.as_deref());
    if gender.is_none() {
        errors.insert("gender".into(), "Gender is required".into());
    }

    let weight = request.weight.filter(|w| w.is_finite() && *w > 0.0);
    if weight.is_none() {
        errors.insert("weight".into(), "Valid weight is required".into());
    }

    let height = request.height.filter(|h| h.is_finite() && *h > 0.0);
    if height.is_none() {
        errors.insert("height".into(), "Valid height is required".into());
    }

    let fitness_level = non_empty(request.fitness_level.as_deref());
    if fitness_level.is_none() {
        errors.insert("fitnessLevel".into(), "Fitness level is required".into());
    }

    if request.fitness_goals.is_empty() {
        errors.insert(
            "fitnessGoals".into(),
            "Please select at least one fitness goal".into(),
        );
    }

    match (email, password, full_name, age, gender, weight, height, fitness_level) {
        (
            Some(email),
            Some(password),
            Some(full_name),
            Some(age),
            Some(gender),
            Some(weight),
            Some(height),
            Some(fitness_level),
        ) if errors.is_empty() => Ok(ValidatedRegistration {
            email,
            password,
            profile: UserProfile {
                full_name,
                age,
                gender,
                weight,
                height,
                fitness_level,
                fitness_goals: request.fitness_goals.clone(),
                medical_conditions: request
                    .medical_conditions
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_owned(),
                preferred_units: non_empty(request.preferred_units.as_deref())
                    .unwrap_or_else(|| DEFAULT_PREFERRED_UNITS.to_owned()),
                target_weight: request.target_weight.filter(|w| w.is_finite() && *w > 0.0),
            },
        }),
        _ => Err(errors),
    }
}

/// Create an account and issue its first token
///
/// # Errors
///
/// Returns `ValidationFailed` with the field map, or a storage/token error
pub async fn register(
    database: &Database,
    auth_manager: &AuthManager,
    request: &RegisterRequest,
) -> AppResult<(User, String)> {
    let email_taken = match request.email.as_deref().map(normalize_email) {
        Some(email) if is_valid_email(&email) => database.get_user_by_email(&email).await?.is_some(),
        _ => false,
    };

    let validated = validate_registration(request, email_taken).map_err(|errors| {
        warn!(fields = ?errors.keys().collect::<Vec<_>>(), "Registration rejected");
        AppError::validation_failed(errors)
    })?;

    let password_hash = hash_password(validated.password).await?;
    let user = database
        .create_user(&User::new(validated.email, password_hash, validated.profile))
        .await
        .map_err(|e| {
            // Lost a race with a concurrent registration for the same email
            if e.code == ErrorCode::ResourceAlreadyExists {
                AppError::validation_failed(BTreeMap::from([(
                    "email".to_owned(),
                    EMAIL_TAKEN.to_owned(),
                )]))
            } else {
                e
            }
        })?;

    let token = auth_manager.generate_token(user.id, &user.email)?;
    AppLogger::log_auth_event(&user.id.to_string(), "register", true, None);
    Ok((user, token))
}

/// Verify credentials and issue a token
///
/// # Errors
///
/// Returns `InvalidInput` for missing fields, `AuthInvalid` for bad credentials
/// or a deactivated account
pub async fn login(
    database: &Database,
    auth_manager: &AuthManager,
    request: &LoginRequest,
) -> AppResult<(User, String)> {
    let email = request.email.as_deref().map(normalize_email).filter(|e| !e.is_empty());
    let password = request.password.clone().filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::invalid_input("Email and password are required"));
    };

    let Some(user) = database.get_user_by_email(&email).await? else {
        AppLogger::log_auth_event("anonymous", "login", false, Some("unknown email"));
        return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("wrong password"));
        return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
    }

    if !user.is_active {
        AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("deactivated"));
        return Err(AppError::auth_invalid(ACCOUNT_DEACTIVATED));
    }

    let token = auth_manager.generate_token(user.id, &user.email)?;
    AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);
    Ok((user, token))
}
