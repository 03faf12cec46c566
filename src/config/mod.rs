// ABOUTME: Configuration management module for server settings loaded from the environment
// ABOUTME: Groups database, auth, CORS, and deployment environment configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

/// Database URL parsing and pool sizing
pub mod database;
/// Environment and server configuration
pub mod environment;
/// Shared configuration enums
pub mod types;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{AuthConfig, CorsConfig, ServerConfig};
pub use types::Environment;
