// ABOUTME: Recipe API route handlers for the banner, generation and lookup endpoints
// ABOUTME: Validates the ingredient list up front and delegates generation to RecipeGenerator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! Recipe routes
//!
//! - `GET /api/recipes`: plain-text service banner
//! - `POST /api/recipes/generate`: generate a recipe; 400 without ingredients
//! - `GET /api/recipes/:id`: no recipe store exists, always 404

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};

use crate::constants::{recipes::MISSING_INGREDIENTS_MESSAGE, service_names};
use crate::errors::{AppError, AppResult};
use crate::models::{RecipeRequest, RecipeResponse};
use crate::recipes::RecipeGenerator;

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(generator: Arc<RecipeGenerator>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::handle_banner))
            .route("/api/recipes/generate", post(Self::handle_generate))
            .route("/api/recipes/:id", get(Self::handle_get_by_id))
            .with_state(generator)
    }

    async fn handle_banner() -> &'static str {
        service_names::API_BANNER
    }

    async fn handle_generate(
        State(generator): State<Arc<RecipeGenerator>>,
        body: Bytes,
    ) -> AppResult<Json<RecipeResponse>> {
        let request = Self::parse_request(&body)?;

        info!(
            ingredients = request.ingredients.len(),
            servings = request.resolved_servings(),
            has_preferences = request.preferences.is_some(),
            "Generating recipe"
        );

        Ok(Json(generator.generate(&request).await))
    }

    async fn handle_get_by_id(Path(id): Path<String>) -> AppError {
        debug!(recipe_id = %id, "Recipe lookup requested; no recipe store");
        AppError::not_found("Recipe")
    }

    /// Decode and validate a generation request
    fn parse_request(body: &[u8]) -> AppResult<RecipeRequest> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::invalid_input(MISSING_INGREDIENTS_MESSAGE));
        }

        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| AppError::invalid_format(format!("Malformed JSON body: {e}")))?;

        let request = RecipeRequest::from_json_value(value)
            .map_err(|e| AppError::invalid_format(format!("Invalid recipe request: {e}")))?;

        if !request.has_ingredients() {
            return Err(AppError::invalid_input(MISSING_INGREDIENTS_MESSAGE));
        }

        Ok(request)
    }
}
