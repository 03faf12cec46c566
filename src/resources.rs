// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Builds the database, auth manager, middleware, and meal generator once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::sync::Arc;

use companion_core::errors::AppResult;
use companion_intelligence::MealPlanGenerator;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::AuthMiddleware;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Persistent storage
    pub database: Arc<Database>,
    /// Token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Bearer header authentication for protected routes
    pub auth_middleware: Arc<AuthMiddleware>,
    /// Meal plan pipeline over the built-in catalog
    pub meal_generator: Arc<MealPlanGenerator>,
    /// Effective configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources around an already connected database
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_days,
        ));
        Self {
            database: Arc::new(database),
            auth_middleware: Arc::new(AuthMiddleware::new(Arc::clone(&auth_manager))),
            auth_manager,
            meal_generator: Arc::new(MealPlanGenerator::default()),
            config: Arc::new(config),
        }
    }

    /// Connect the configured database and assemble resources
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn initialize(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database).await?;
        Ok(Self::new(database, config))
    }
}
