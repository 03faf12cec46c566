// ABOUTME: Challenge catalog, enrollment, and day-completion routes
// ABOUTME: Completing the final day grants experience, a badge, and possibly a level milestone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use companion_core::errors::AppError;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::resources::ServerResources;
use crate::services::challenges;
use super::JsonBody;

/// Day completion body
#[derive(Debug, Default, Deserialize)]
pub struct CompleteDayBody {
    /// Progress day key, `YYYY-MM-DD`
    pub day: Option<String>,
}

/// Challenge route handlers
pub struct ChallengeRoutes;

impl ChallengeRoutes {
    /// Create all challenge routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/challenges", get(Self::handle_catalog))
            .route("/api/challenges/:id/join", post(Self::handle_join))
            .route("/api/user-challenges", get(Self::handle_enrollments))
            .route(
                "/api/user-challenges/:id/complete-day",
                post(Self::handle_complete_day),
            )
            .with_state(resources)
    }

    /// Handle GET /api/challenges
    async fn handle_catalog(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let catalog = challenges::list_with_status(&resources.database, auth.user_id).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "challenges": catalog })),
        )
            .into_response())
    }

    /// Handle POST /api/challenges/:id/join
    async fn handle_join(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(challenge_id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let enrollment =
            challenges::join(&resources.database, auth.user_id, &challenge_id, Utc::now()).await?;
        Ok((
            StatusCode::CREATED,
            Json(json!({ "success": true, "user_challenge": enrollment })),
        )
            .into_response())
    }

    /// Handle GET /api/user-challenges
    async fn handle_enrollments(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let enrollments = challenges::list_enrollments(&resources.database, auth.user_id).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "user_challenges": enrollments })),
        )
            .into_response())
    }

    /// Handle POST /api/user-challenges/:id/complete-day
    async fn handle_complete_day(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(user_challenge_id): Path<String>,
        JsonBody(body): JsonBody<CompleteDayBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let user_challenge_id =
            Uuid::parse_str(&user_challenge_id).map_err(|_| AppError::not_found("Challenge"))?;
        let day = body
            .day
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::missing_field("day"))?;

        let result = challenges::complete_day(
            &resources.database,
            auth.user_id,
            user_challenge_id,
            day.trim(),
            Utc::now(),
        )
        .await?;

        Ok((
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Day completed",
                "challenge_completed": result.completion.is_some(),
                "user_challenge": result.user_challenge,
            })),
        )
            .into_response())
    }
}
