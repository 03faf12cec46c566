// ABOUTME: Core types and constants for the Fitness Companion platform
// ABOUTME: Foundation crate with error handling, shared domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

#![deny(unsafe_code)]

//! # Companion Core
//!
//! Foundation crate providing shared types and constants for the Fitness
//! Companion platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and HTTP error bodies
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Meal, challenge, and award types shared by the engine and the server

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (meal records, meal plans, challenges, awards)
pub mod models;
