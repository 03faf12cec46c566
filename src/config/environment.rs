// ABOUTME: Environment-based server configuration for port, database, tokens, and CORS
// ABOUTME: Every setting has a development default so the server starts with no variables set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::env;

use companion_core::constants::auth::DEFAULT_TOKEN_EXPIRY_DAYS;
use companion_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::database::{DatabaseConfig, DatabaseUrl, DEFAULT_DATABASE_URL};
use super::types::Environment;

/// HTTP port used when `HTTP_PORT` is unset
pub const DEFAULT_HTTP_PORT: u16 = 5000;
/// Signing secret used when `JWT_SECRET_KEY` is unset
pub const DEFAULT_JWT_SECRET: &str = "dev-jwt-secret";

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Token lifetime in days
    pub jwt_expiry_days: i64,
}

impl AuthConfig {
    /// Whether the built-in development secret is in use
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_owned(),
            jwt_expiry_days: DEFAULT_TOKEN_EXPIRY_DAYS,
        }
    }
}

/// Cross-origin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// `*` or a comma-separated origin list
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Token configuration
    pub auth: AuthConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` or `JWT_EXPIRY_DAYS` is set but not a valid
    /// number, or if the expiry is not positive
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let http_port = env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
            .parse()
            .map_err(|e| AppError::config(format!("Invalid HTTP_PORT value: {e}")))?;

        let jwt_expiry_days: i64 =
            env_var_or("JWT_EXPIRY_DAYS", &DEFAULT_TOKEN_EXPIRY_DAYS.to_string())
                .parse()
                .map_err(|e| AppError::config(format!("Invalid JWT_EXPIRY_DAYS value: {e}")))?;
        if jwt_expiry_days <= 0 {
            return Err(AppError::config("JWT_EXPIRY_DAYS must be positive"));
        }

        let config = Self {
            http_port,
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig::new(DatabaseUrl::parse_url(&env_var_or(
                "DATABASE_URL",
                DEFAULT_DATABASE_URL,
            ))),
            auth: AuthConfig {
                jwt_secret: env_var_or("JWT_SECRET_KEY", DEFAULT_JWT_SECRET),
                jwt_expiry_days,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        };

        if config.environment.is_production() && config.auth.uses_default_secret() {
            warn!("JWT_SECRET_KEY is not set in production; tokens are signed with the development secret");
        }

        Ok(config)
    }

    /// Configuration for tests: in-memory database, testing environment
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            http_port: 0,
            environment: Environment::Testing,
            database: DatabaseConfig::new(DatabaseUrl::Memory),
            ..Self::default()
        }
    }

    /// Human-readable summary for startup logs (never includes secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Fitness Companion Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Token Expiry: {} days\n\
             - JWT Secret: {}\n\
             - CORS Origins: {}",
            self.http_port,
            self.environment,
            self.database.url,
            self.auth.jwt_expiry_days,
            if self.auth.uses_default_secret() {
                "development default"
            } else {
                "configured"
            },
            self.cors.allowed_origins,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
