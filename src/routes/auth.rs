// ABOUTME: Account routes: registration, login, profile, logout, and health metrics
// ABOUTME: Issues bearer tokens and reports BMI/body-fat figures from the stored profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! Authentication routes
//!
//! Registration and login are public; every other route requires a bearer
//! token. Tokens are stateless, so logout only acknowledges the request.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use companion_core::errors::AppError;
use companion_intelligence::health_metrics::{self, BodyMeasurements, HealthMetrics};
use serde::Serialize;
use uuid::Uuid;

use crate::logging::AppLogger;
use crate::models::User;
use crate::resources::ServerResources;
use crate::services::accounts::{self, LoginRequest, RegisterRequest};
use super::JsonBody;

/// User summary returned after registration
#[derive(Debug, Serialize)]
struct RegisteredUser<'a> {
    id: Uuid,
    email: &'a str,
    full_name: &'a str,
    fitness_level: &'a str,
}

/// User summary returned after login
#[derive(Debug, Serialize)]
struct LoggedInUser<'a> {
    id: Uuid,
    email: &'a str,
    full_name: &'a str,
    fitness_level: &'a str,
    fitness_goals: &'a [String],
    preferred_units: &'a str,
}

#[derive(Debug, Serialize)]
struct TokenResponse<U> {
    success: bool,
    message: &'static str,
    token: String,
    user: U,
}

#[derive(Debug, Serialize)]
struct MetricsBody {
    #[serde(flatten)]
    metrics: HealthMetrics,
    user_data: BodyMeasurements,
}

/// Account route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/profile", get(Self::handle_profile))
            .route("/api/auth/logout", post(Self::handle_logout))
            .route(
                "/api/auth/calculate-health-metrics",
                get(Self::handle_health_metrics),
            )
            .route("/api/auth/test", get(Self::handle_test))
            .with_state(resources)
    }

    async fn current_user(resources: &ServerResources, headers: &HeaderMap) -> Result<User, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(headers)?;
        resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let (user, token) =
            accounts::register(&resources.database, &resources.auth_manager, &request).await?;

        let body = TokenResponse {
            success: true,
            message: "Registration successful!",
            token,
            user: RegisteredUser {
                id: user.id,
                email: &user.email,
                full_name: &user.profile.full_name,
                fitness_level: &user.profile.fitness_level,
            },
        };
        Ok((StatusCode::CREATED, Json(body)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(request): JsonBody<LoginRequest>,
    ) -> Result<Response, AppError> {
        let (user, token) =
            accounts::login(&resources.database, &resources.auth_manager, &request).await?;

        let body = TokenResponse {
            success: true,
            message: "Login successful!",
            token,
            user: LoggedInUser {
                id: user.id,
                email: &user.email,
                full_name: &user.profile.full_name,
                fitness_level: &user.profile.fitness_level,
                fitness_goals: &user.profile.fitness_goals,
                preferred_units: &user.profile.preferred_units,
            },
        };
        Ok((StatusCode::OK, Json(body)).into_response())
    }

    /// Handle GET /api/auth/profile
    async fn handle_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = Self::current_user(&resources, &headers).await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "user": user })),
        )
            .into_response())
    }

    /// Handle POST /api/auth/logout
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        AppLogger::log_auth_event(&auth.user_id.to_string(), "logout", true, None);
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": "Logged out successfully",
            })),
        )
            .into_response())
    }

    /// Handle GET /api/auth/calculate-health-metrics
    async fn handle_health_metrics(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = Self::current_user(&resources, &headers).await?;
        let measurements = user.body_measurements();
        let metrics = health_metrics::calculate(&measurements)?;

        let body = MetricsBody {
            metrics,
            user_data: measurements,
        };
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "metrics": body })),
        )
            .into_response())
    }

    /// Handle GET /api/auth/test
    async fn handle_test() -> Json<serde_json::Value> {
        Json(serde_json::json!({ "message": "Auth routes working" }))
    }
}
