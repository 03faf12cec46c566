// ABOUTME: HTTP tests for meal preferences, plan generation, history, and manual entries
// ABOUTME: Covers missing-preference errors, owner scoping, and date validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;
mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use fitness_companion::models::{MealPlan, MealRecord};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

fn preferences_body() -> Value {
    json!({
        "age_group": "adult",
        "dietary_preference": "vegetarian",
        "fitness_goal": "weight_loss",
    })
}

#[tokio::test]
async fn test_preferences_upsert_keeps_identity() {
    let (app, resources) = common::create_test_app().await;
    let user = common::create_test_user(&resources.database, "prefs@example.com").await;
    let token = common::token_for(&resources, &user);

    let missing: Value = AxumTestRequest::get("/api/preferences")
        .bearer(&token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(missing["error"], "Preferences not found");

    let first: Value = AxumTestRequest::post("/api/preferences")
        .bearer(&token)
        .json(&preferences_body())
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let second: Value = AxumTestRequest::post("/api/preferences")
        .bearer(&token)
        .json(&json!({
            "age_group": "young",
            "dietary_preference": "non_vegetarian",
            "fitness_goal": "weight_gain",
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(first["preferences"]["id"], second["preferences"]["id"]);
    assert_eq!(first["preferences"]["created_at"], second["preferences"]["created_at"]);

    let stored: Value = AxumTestRequest::get("/api/preferences")
        .bearer(&token)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(stored["preferences"]["age_group"], "young");
    assert_eq!(stored["preferences"]["fitness_goal"], "weight_gain");
}

#[tokio::test]
async fn test_preferences_require_all_fields() {
    let (app, resources) = common::create_test_app().await;
    let user = common::create_test_user(&resources.database, "partial@example.com").await;
    let token = common::token_for(&resources, &user);

    let body: Value = AxumTestRequest::post("/api/preferences")
        .bearer(&token)
        .json(&json!({ "age_group": "adult" }))
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(body["errors"]["dietary_preference"].is_string());
    assert!(body["errors"]["fitness_goal"].is_string());
}

#[tokio::test]
async fn test_generation_requires_preferences() {
    let (app, resources) = common::create_test_app().await;
    let user = common::create_test_user(&resources.database, "noprefs@example.com").await;
    let token = common::token_for(&resources, &user);

    for request in [
        AxumTestRequest::post("/api/generate-meal-plan"),
        AxumTestRequest::get("/api/meals/available"),
    ] {
        let body: Value = request
            .bearer(&token)
            .send(app.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body["error"], "Please set your preferences first");
        assert_eq!(body["code"], "PRECONDITION_FAILED");
    }
}

#[tokio::test]
async fn test_generate_plan_and_history() {
    let (app, resources) = common::create_test_app().await;
    let user = common::create_test_user(&resources.database, "plans@example.com").await;
    let token = common::token_for(&resources, &user);

    AxumTestRequest::post("/api/preferences")
        .bearer(&token)
        .json(&preferences_body())
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let generated: Value = AxumTestRequest::post("/api/generate-meal-plan")
        .bearer(&token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    for slot in ["breakfast", "lunch", "dinner"] {
        let name = generated["meal_plan"][slot]["name"].as_str().unwrap();
        assert!(!name.is_empty());
    }
    let saved_id = generated["saved_plan_id"].as_str().unwrap().to_owned();

    // Outside the seven-day window
    let stale = MealPlan {
        breakfast: MealRecord::placeholder(),
        lunch: MealRecord::placeholder(),
        dinner: MealRecord::placeholder(),
        generated_at: Utc::now() - Duration::days(8),
    };
    resources.database.insert_generated_plan(user.id, &stale).await.unwrap();

    let history: Value = AxumTestRequest::get("/api/meal-plans/history")
        .bearer(&token)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let plans = history["meal_plans"].as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["id"], saved_id.as_str());
    assert!(plans[0]["breakfast"]["name"].is_string());
}

#[tokio::test]
async fn test_available_meals_match_preferences() {
    let (app, resources) = common::create_test_app().await;
    let user = common::create_test_user(&resources.database, "avail@example.com").await;
    let token = common::token_for(&resources, &user);

    AxumTestRequest::post("/api/preferences")
        .bearer(&token)
        .json(&preferences_body())
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = AxumTestRequest::get("/api/meals/available")
        .bearer(&token)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let meals = body["available_meals"].as_array().unwrap();
    assert!(!meals.is_empty());
    for meal in meals {
        let tags: Vec<&str> = meal["tags"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert!(tags.contains(&"adult"));
        assert!(tags.contains(&"weight_loss"));
        assert!(!tags.contains(&"non_vegetarian"));
    }
}

#[tokio::test]
async fn test_manual_entries_lifecycle() {
    let (app, resources) = common::create_test_app().await;
    let owner = common::create_test_user(&resources.database, "owner@example.com").await;
    let other = common::create_test_user(&resources.database, "other@example.com").await;
    let owner_token = common::token_for(&resources, &owner);
    let other_token = common::token_for(&resources, &other);

    let created: Value = AxumTestRequest::post("/api/meal-plans")
        .bearer(&owner_token)
        .json(&json!({
            "meal_type": "breakfast",
            "meal_name": "Oats",
            "quantity": 1.5,
            "date": "2025-03-01",
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let entry_id = created["meal_plan"]["id"].as_str().unwrap().to_owned();
    assert_eq!(created["meal_plan"]["date"], "2025-03-01");

    let day: Value = AxumTestRequest::get("/api/meal-plans/2025-03-01")
        .bearer(&owner_token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(day["meal_plans"].as_array().unwrap().len(), 1);

    let other_day: Value = AxumTestRequest::get("/api/meal-plans/2025-03-01")
        .bearer(&other_token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(other_day["meal_plans"].as_array().unwrap().is_empty());

    let path = format!("/api/meal-plans/{entry_id}");
    AxumTestRequest::put(&path)
        .bearer(&other_token)
        .json(&json!({ "meal_name": "Stolen", "quantity": 1 }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let updated: Value = AxumTestRequest::put(&path)
        .bearer(&owner_token)
        .json(&json!({ "meal_name": "Poha", "quantity": 2 }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["message"], "Meal plan updated");

    let day: Value = AxumTestRequest::get("/api/meal-plans/2025-03-01")
        .bearer(&owner_token)
        .send(app.clone())
        .await
        .json();
    assert_eq!(day["meal_plans"][0]["meal_name"], "Poha");
    assert_eq!(day["meal_plans"][0]["quantity"], 2.0);

    AxumTestRequest::delete(&path)
        .bearer(&other_token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let deleted: Value = AxumTestRequest::delete(&path)
        .bearer(&owner_token)
        .send(app.clone())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(deleted["message"], "Meal plan deleted");

    AxumTestRequest::delete(&path)
        .bearer(&owner_token)
        .send(app)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manual_entry_validation() {
    let (app, resources) = common::create_test_app().await;
    let user = common::create_test_user(&resources.database, "entries@example.com").await;
    let token = common::token_for(&resources, &user);

    AxumTestRequest::post("/api/meal-plans")
        .bearer(&token)
        .json(&json!({
            "meal_type": "lunch",
            "meal_name": "Dal",
            "quantity": 1,
            "date": "03/01/2025",
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let body: Value = AxumTestRequest::post("/api/meal-plans")
        .bearer(&token)
        .json(&json!({ "meal_type": "lunch", "quantity": 0 }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(body["errors"]["meal_name"].is_string());
    assert!(body["errors"]["quantity"].is_string());
    assert!(body["errors"]["date"].is_string());

    AxumTestRequest::get("/api/meal-plans/not-a-date")
        .bearer(&token)
        .send(app)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
