// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Account, meal-plan, and challenge rules shared by the HTTP routes and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! Domain service layer
//!
//! Route handlers stay thin: they authenticate, parse the request, call into a
//! service, and shape the JSON response.

/// Registration validation and login
pub mod accounts;

/// Challenge enrollment, day completion, and completion rewards
pub mod challenges;

/// Meal plan generation, available meals, and plan history
pub mod meals;
