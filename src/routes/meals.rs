// ABOUTME: Meal preference, generated plan, and manual meal-plan entry routes
// ABOUTME: Generation runs the filter/select/format pipeline over the caller's saved preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use companion_core::constants::formats::DAY_FORMAT;
use companion_core::errors::AppError;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::models::{MealPreferences, NewMealPlanEntry};
use crate::resources::ServerResources;
use crate::services::meals;
use super::JsonBody;

/// Preference body; every field is required and non-empty
#[derive(Debug, Default, Deserialize)]
pub struct PreferencesBody {
    /// Age bucket
    pub age_group: Option<String>,
    /// Dietary preference
    pub dietary_preference: Option<String>,
    /// Fitness goal
    pub fitness_goal: Option<String>,
}

impl PreferencesBody {
    fn validate(self) -> Result<MealPreferences, AppError> {
        let mut errors = BTreeMap::new();
        let age_group = required_text("age_group", self.age_group, &mut errors);
        let dietary_preference =
            required_text("dietary_preference", self.dietary_preference, &mut errors);
        let fitness_goal = required_text("fitness_goal", self.fitness_goal, &mut errors);
        check(errors)?;
        Ok(MealPreferences::new(age_group, dietary_preference, fitness_goal))
    }
}

/// Manual entry body
#[derive(Debug, Default, Deserialize)]
pub struct NewEntryBody {
    /// Slot label such as `breakfast`
    pub meal_type: Option<String>,
    /// Meal eaten
    pub meal_name: Option<String>,
    /// Servings
    pub quantity: Option<f64>,
    /// Calendar day, `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Manual entry update body
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntryBody {
    /// Replacement meal
    pub meal_name: Option<String>,
    /// Replacement servings
    pub quantity: Option<f64>,
}

fn parse_day(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, DAY_FORMAT)
        .map_err(|_| AppError::invalid_format(format!("Invalid date {raw:?}, expected YYYY-MM-DD")))
}

fn required_text(field: &str, value: Option<String>, errors: &mut BTreeMap<String, String>) -> String {
    match value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty()) {
        Some(v) => v,
        None => {
            errors.insert(field.to_owned(), format!("{field} is required"));
            String::new()
        }
    }
}

fn required_quantity(value: Option<f64>, errors: &mut BTreeMap<String, String>) -> f64 {
    match value.filter(|q| q.is_finite() && *q > 0.0) {
        Some(q) => q,
        None => {
            errors.insert("quantity".to_owned(), "quantity must be a positive number".to_owned());
            0.0
        }
    }
}

fn check(errors: BTreeMap<String, String>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation_failed(errors))
    }
}

/// Entry ids that do not parse cannot belong to the caller
fn owned_entry_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found("Meal plan"))
}

/// Meal route handlers
pub struct MealRoutes;

impl MealRoutes {
    /// Create all meal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/preferences",
                post(Self::handle_set_preferences).get(Self::handle_get_preferences),
            )
            .route("/api/generate-meal-plan", post(Self::handle_generate))
            .route("/api/meal-plans/history", get(Self::handle_history))
            .route("/api/meals/available", get(Self::handle_available))
            .route("/api/meal-plans", post(Self::handle_create_entry))
            .route(
                "/api/meal-plans/:key",
                get(Self::handle_entries_for_day)
                    .put(Self::handle_update_entry)
                    .delete(Self::handle_delete_entry),
            )
            .with_state(resources)
    }

    /// Handle POST /api/preferences
    async fn handle_set_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        JsonBody(body): JsonBody<PreferencesBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let preferences = body.validate()?;
        let stored = resources
            .database
            .upsert_preferences(auth.user_id, &preferences)
            .await?;
        info!(user_id = %auth.user_id, "Meal preferences saved");
        Ok((
            StatusCode::CREATED,
            Json(json!({ "success": true, "preferences": stored })),
        )
            .into_response())
    }

    /// Handle GET /api/preferences
    async fn handle_get_preferences(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let stored = resources
            .database
            .get_preferences(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Preferences"))?;
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "preferences": stored })),
        )
            .into_response())
    }

    /// Handle POST /api/generate-meal-plan
    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let saved =
            meals::generate_for_user(&resources.database, &resources.meal_generator, auth.user_id)
                .await?;
        Ok((
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "meal_plan": saved.plan,
                "saved_plan_id": saved.id,
            })),
        )
            .into_response())
    }

    /// Handle GET /api/meal-plans/history
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let plans = meals::recent_plans(&resources.database, auth.user_id, Utc::now()).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "meal_plans": plans })),
        )
            .into_response())
    }

    /// Handle GET /api/meals/available
    async fn handle_available(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let available =
            meals::available_for_user(&resources.database, &resources.meal_generator, auth.user_id)
                .await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "available_meals": available })),
        )
            .into_response())
    }

    /// Handle POST /api/meal-plans
    async fn handle_create_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        JsonBody(body): JsonBody<NewEntryBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;

        let mut errors = BTreeMap::new();
        let meal_type = required_text("meal_type", body.meal_type, &mut errors);
        let meal_name = required_text("meal_name", body.meal_name, &mut errors);
        let quantity = required_quantity(body.quantity, &mut errors);
        let raw_date = required_text("date", body.date, &mut errors);
        check(errors)?;

        let entry = NewMealPlanEntry {
            meal_type,
            meal_name,
            quantity,
            date: parse_day(&raw_date)?,
        };
        let stored = resources.database.create_meal_entry(auth.user_id, &entry).await?;
        Ok((
            StatusCode::CREATED,
            Json(json!({ "success": true, "meal_plan": stored })),
        )
            .into_response())
    }

    /// Handle GET /api/meal-plans/:date
    async fn handle_entries_for_day(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(key): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let day = parse_day(&key)?;
        let entries = resources.database.list_meal_entries(auth.user_id, day).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "meal_plans": entries })),
        )
            .into_response())
    }

    /// Handle PUT /api/meal-plans/:id
    async fn handle_update_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(key): Path<String>,
        JsonBody(body): JsonBody<UpdateEntryBody>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let entry_id = owned_entry_id(&key)?;

        let mut errors = BTreeMap::new();
        let meal_name = required_text("meal_name", body.meal_name, &mut errors);
        let quantity = required_quantity(body.quantity, &mut errors);
        check(errors)?;

        if !resources
            .database
            .update_meal_entry(auth.user_id, entry_id, &meal_name, quantity)
            .await?
        {
            return Err(AppError::not_found("Meal plan"));
        }
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Meal plan updated" })),
        )
            .into_response())
    }

    /// Handle DELETE /api/meal-plans/:id
    async fn handle_delete_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(key): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = resources.auth_middleware.authenticate_headers(&headers)?;
        let entry_id = owned_entry_id(&key)?;
        if !resources.database.delete_meal_entry(auth.user_id, entry_id).await? {
            return Err(AppError::not_found("Meal plan"));
        }
        Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Meal plan deleted" })),
        )
            .into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_body_requires_every_field() {
        let err = PreferencesBody {
            age_group: Some("adult".into()),
            dietary_preference: Some("  ".into()),
            fitness_goal: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.http_status(), 400);
        assert!(err.field_errors.contains_key("dietary_preference"));
        assert!(err.field_errors.contains_key("fitness_goal"));
        assert!(!err.field_errors.contains_key("age_group"));
    }

    #[test]
    fn test_parse_day_rejects_other_formats() {
        assert!(parse_day("2025-03-01").is_ok());
        assert!(parse_day("01/03/2025").is_err());
        assert!(parse_day("2025-02-30").is_err());
    }

    #[test]
    fn test_unparseable_entry_id_is_not_found() {
        assert_eq!(owned_entry_id("not-a-uuid").unwrap_err().http_status(), 404);
    }
}
