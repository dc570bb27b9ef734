// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints reporting the AI provider mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! Health check routes for service monitoring
//!
//! Readiness never depends on the upstream provider: without an endpoint the
//! service still answers every request through the placeholder generator.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::constants::service_names;
use crate::recipes::RecipeGenerator;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(generator: Arc<RecipeGenerator>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(generator)
    }

    async fn health_handler() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": service_names::SMART_RECIPE_SERVER,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(State(generator): State<Arc<RecipeGenerator>>) -> Json<Value> {
        let config = generator.config();
        Json(json!({
            "status": "ready",
            "ai": {
                "mode": if config.has_endpoint() { "provider" } else { "placeholder" },
                "api_key_present": config.api_key_present(),
            },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
