// ABOUTME: Main library entry point for the Fitness Companion API
// ABOUTME: Wires configuration, persistence, authentication, services, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

#![deny(unsafe_code)]

//! # Fitness Companion
//!
//! HTTP backend for a fitness companion app: account registration and login,
//! BMI and body-fat metrics, meal preferences with evolutionary meal-plan
//! generation, manual meal logging, and gamified challenges with badges,
//! milestones, and levels.
//!
//! ## Architecture
//!
//! - `companion-core`: error type, constants, and shared domain models
//! - `companion-intelligence`: meal catalog and selector, health metrics,
//!   progression rules, and the challenge catalog
//! - this crate: configuration, `SQLite` persistence, auth, services, and routes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitness_companion::config::ServerConfig;
//! use fitness_companion::resources::ServerResources;
//! use fitness_companion::server::run_server;
//! use companion_core::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = ServerResources::initialize(config).await?;
//!     run_server(Arc::new(resources)).await
//! }
//! ```

/// JWT issuing/validation and password hashing
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// `SQLite` persistence
pub mod database;

/// Structured logging setup
pub mod logging;

/// Request authentication and CORS
pub mod middleware;

/// Stored records and response views
pub mod models;

/// Shared state handed to route handlers
pub mod resources;

/// HTTP route handlers by domain
pub mod routes;

/// Router assembly and HTTP serving
pub mod server;

/// Business rules shared by routes
pub mod services;
