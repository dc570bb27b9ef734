// ABOUTME: Route module organization for the recipe API HTTP endpoints
// ABOUTME: Assembles domain routers and the shared CORS, tracing and body-limit layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! Route module for the Smart Recipe Server
//!
//! Each domain module holds route definitions and thin handlers that
//! delegate to the recipe generation service.

/// Health check and readiness routes
pub mod health;
/// Recipe generation routes
pub mod recipes;

use std::sync::Arc;

use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::constants::defaults::MAX_REQUEST_BODY_BYTES;
use crate::middleware::setup_cors;
use crate::recipes::RecipeGenerator;

/// Health route handlers
pub use health::HealthRoutes;
/// Recipe route handlers
pub use recipes::RecipeRoutes;

/// Build the complete application router
pub fn build_router(config: &ServerConfig, generator: Arc<RecipeGenerator>) -> Router {
    Router::new()
        .merge(RecipeRoutes::routes(Arc::clone(&generator)))
        .merge(HealthRoutes::routes(generator))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(setup_cors(&config.cors))
}
