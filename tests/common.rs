// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory resources, and account/token helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fitness_companion`

use std::sync::{Arc, Once};

use axum::Router;
use fitness_companion::{
    config::ServerConfig,
    database::Database,
    models::{User, UserProfile},
    resources::ServerResources,
    server::build_router,
};
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database
pub async fn create_test_database() -> Database {
    init_test_logging();
    let config = ServerConfig::for_testing();
    Database::new(&config.database)
        .await
        .expect("Failed to create test database")
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources() -> Arc<ServerResources> {
    let database = create_test_database().await;
    Arc::new(ServerResources::new(database, ServerConfig::for_testing()))
}

/// Application router plus the resources behind it
pub async fn create_test_app() -> (Router, Arc<ServerResources>) {
    let resources = create_test_resources().await;
    (build_router(Arc::clone(&resources)), resources)
}

/// Profile that passes every registration rule
pub fn sample_profile() -> UserProfile {
    UserProfile {
        full_name: "Test Athlete".into(),
        age: 30,
        gender: "male".into(),
        weight: 80.0,
        height: 180.0,
        fitness_level: "intermediate".into(),
        fitness_goals: vec!["stay_fit".into()],
        medical_conditions: String::new(),
        preferred_units: "metric".into(),
        target_weight: None,
    }
}

/// Store a user directly, bypassing the HTTP layer
pub async fn create_test_user(database: &Database, email: &str) -> User {
    database
        .create_user(&User::new(email.into(), "not-a-real-hash".into(), sample_profile()))
        .await
        .expect("Failed to create test user")
}

/// Registration body that passes every rule
pub fn registration_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": "Secret123",
        "fullName": "Test Athlete",
        "age": 30,
        "gender": "male",
        "weight": 80.0,
        "height": 180.0,
        "fitnessLevel": "intermediate",
        "fitnessGoals": ["stay_fit"],
    })
}

/// Issue a token for a stored user
pub fn token_for(resources: &ServerResources, user: &User) -> String {
    resources
        .auth_manager
        .generate_token(user.id, &user.email)
        .expect("Failed to generate token")
}
