// ABOUTME: HTTP integration tests for the recipe routes
// ABOUTME: Covers validation, placeholder generation, response casing and the unimplemented lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

// ============================================================================
// GET /api/recipes
// ============================================================================

#[tokio::test]
async fn test_banner_is_plain_text() {
    let response = AxumTestRequest::get("/api/recipes")
        .send(common::placeholder_router())
        .await;

    assert_eq!(response.status(), 200);
    assert!(response
        .content_type()
        .is_some_and(|ct| ct.starts_with("text/plain")));
    assert_eq!(response.text(), "Smart Recipe Generator API");
}

// ============================================================================
// POST /api/recipes/generate - validation
// ============================================================================

#[tokio::test]
async fn test_generate_rejects_empty_ingredient_list() {
    let response = AxumTestRequest::post("/api/recipes/generate")
        .json(&json!({ "ingredients": [] }))
        .send(common::placeholder_router())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["message"], "Please provide a list of ingredients.");
}

#[tokio::test]
async fn test_generate_rejects_missing_ingredients() {
    for payload in [json!({ "servings": 2 }), json!({ "ingredients": null })] {
        let response = AxumTestRequest::post("/api/recipes/generate")
            .json(&payload)
            .send(common::placeholder_router())
            .await;
        assert_eq!(response.status(), 400, "payload {payload}");
    }
}

#[tokio::test]
async fn test_generate_rejects_empty_body() {
    let response = AxumTestRequest::post("/api/recipes/generate")
        .raw_json("")
        .send(common::placeholder_router())
        .await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_generate_rejects_malformed_json() {
    let response = AxumTestRequest::post("/api/recipes/generate")
        .raw_json("{\"ingredients\": [\"egg\"")
        .send(common::placeholder_router())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
}

// ============================================================================
// POST /api/recipes/generate - placeholder mode
// ============================================================================

#[tokio::test]
async fn test_generate_without_endpoint_returns_placeholder() {
    let response = AxumTestRequest::post("/api/recipes/generate")
        .json(&json!({ "ingredients": ["egg", "rice"] }))
        .send(common::placeholder_router())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["title"], "Quick egg & rice Dish");
    assert_eq!(body["ingredients"], json!(["egg", "rice"]));
    assert_eq!(body["steps"].as_array().unwrap().len(), 3);
    assert_eq!(body["nutrition"]["calories"], 240);
    assert_eq!(body["nutrition"]["proteinGrams"], 7.0);
    assert_eq!(body["nutrition"]["fatGrams"], 10.0);
    assert_eq!(body["nutrition"]["carbsGrams"], 24.0);
    assert_eq!(body["servings"], 1);
}

#[tokio::test]
async fn test_generate_accepts_any_field_casing() {
    let response = AxumTestRequest::post("/api/recipes/generate")
        .json(&json!({
            "Ingredients": ["Tomato", "Basil"],
            "Preferences": { "Vegan": true, "MaxCalories": 400 },
            "SERVINGS": 4
        }))
        .send(common::placeholder_router())
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["title"], "Quick Tomato & Basil Dish");
    assert_eq!(body["servings"], 4);
}

#[tokio::test]
async fn test_generate_coerces_non_positive_servings() {
    for servings in [0, -2] {
        let response = AxumTestRequest::post("/api/recipes/generate")
            .json(&json!({ "ingredients": ["egg"], "servings": servings }))
            .send(common::placeholder_router())
            .await;
        let body: Value = response.json();
        assert_eq!(body["servings"], 1);
    }
}

#[tokio::test]
async fn test_generate_preserves_trimmed_non_empty_ingredients() {
    let response = AxumTestRequest::post("/api/recipes/generate")
        .json(&json!({ "ingredients": [" leek ", "", "potato", "   ", "cream"] }))
        .send(common::placeholder_router())
        .await;

    let body: Value = response.json();
    assert_eq!(body["ingredients"], json!(["leek", "potato", "cream"]));
    assert!(!body["title"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_omits_absent_optional_fields() {
    let response = AxumTestRequest::post("/api/recipes/generate")
        .json(&json!({ "ingredients": ["egg"] }))
        .send(common::placeholder_router())
        .await;

    let body: Value = response.json();
    let object = body.as_object().unwrap();
    assert!(!object.contains_key("description"));
    assert!(!object.contains_key("imageUrl"));
    assert!(!object.contains_key("imageDescription"));
    assert!(!response_contains_null(&body));
}

fn response_contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(response_contains_null),
        Value::Object(map) => map.values().any(response_contains_null),
        _ => false,
    }
}

// ============================================================================
// GET /api/recipes/:id
// ============================================================================

#[tokio::test]
async fn test_get_recipe_by_id_is_not_found() {
    let response = AxumTestRequest::get("/api/recipes/42")
        .send(common::placeholder_router())
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}
