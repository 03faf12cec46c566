// ABOUTME: Badge, milestone, and level progress routes
// ABOUTME: Read-only views over awards granted by challenge completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use companion_core::errors::AppError;
use serde::Serialize;
use serde_json::json;

use crate::models::AwardKind;
use crate::resources::ServerResources;

/// Level summary for the caller
#[derive(Debug, Serialize)]
struct ProgressSummary {
    level: u32,
    experience: u32,
    badges_count: u32,
    milestones_count: u32,
}

/// Gamification route handlers
pub struct GamificationRoutes;

impl GamificationRoutes {
    /// Create all gamification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/badges", get(Self::handle_badges))
            .route("/api/milestones", get(Self::handle_milestones))
            .route("/api/progress", get(Self::handle_progress))
            .with_state(resources)
    }

    /// Handle GET /api/badges
    async fn handle_badges(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let badges = resources
            .database
            .list_awards(auth.user_id, AwardKind::Badge)
            .await?;
        Ok((StatusCode::OK, Json(json!({ "success": true, "badges": badges }))).into_response())
    }

    /// Handle GET /api/milestones
    async fn handle_milestones(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let milestones = resources
            .database
            .list_awards(auth.user_id, AwardKind::Milestone)
            .await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "milestones": milestones })),
        )
            .into_response())
    }

    /// Handle GET /api/progress
    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let user = resources
            .database
            .get_user(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let progress = ProgressSummary {
            level: user.level,
            experience: user.experience,
            badges_count: resources
                .database
                .count_awards(auth.user_id, AwardKind::Badge)
                .await?,
            milestones_count: resources
                .database
                .count_awards(auth.user_id, AwardKind::Milestone)
                .await?,
        };
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "progress": progress })),
        )
            .into_response())
    }
}
