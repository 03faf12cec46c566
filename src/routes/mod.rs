// ABOUTME: Route module organization for the Fitness Companion HTTP API
// ABOUTME: One router per domain, merged by the server into a single application router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! Route module for the Fitness Companion API
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to the service layer or the database.

/// Registration, login, profile, and health metric routes
pub mod auth;
/// Challenge catalog and enrollment routes
pub mod challenges;
/// Badge, milestone, and progress routes
pub mod gamification;
/// Health check and readiness routes
pub mod health;
/// Preference, meal plan generation, and manual entry routes
pub mod meals;

use axum::extract::FromRequest;
use companion_core::errors::AppError;

/// JSON request body whose parse failures use the API error shape
///
/// Malformed JSON, a wrong content type, or mistyped fields are rejected with
/// an `INVALID_INPUT` body instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Challenge route handlers
pub use challenges::ChallengeRoutes;
/// Gamification route handlers
pub use gamification::GamificationRoutes;
/// Health route handlers
pub use health::HealthRoutes;
/// Meal route handlers
pub use meals::MealRoutes;
