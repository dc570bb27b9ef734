// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, AI configurations and generator construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::path::PathBuf;
use std::sync::{Arc, Once};
use std::time::Duration;

use smart_recipe_server::config::{AiConfig, ServerConfig};
use smart_recipe_server::recipes::RecipeGenerator;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet test logging once per test binary
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// AI configuration pointing at `endpoint` with a short timeout
pub fn ai_config(provider: &str, endpoint: &str, api_key: Option<&str>) -> AiConfig {
    AiConfig {
        provider: provider.to_owned(),
        endpoint: Some(endpoint.to_owned()),
        api_key: api_key.map(str::to_owned),
        model: Some("test-model".to_owned()),
        request_timeout: Duration::from_secs(5),
        credentials_path: None,
    }
}

/// Same as [`ai_config`] with a service-account credential file
pub fn ai_config_with_credentials(provider: &str, endpoint: &str, credentials: PathBuf) -> AiConfig {
    AiConfig {
        credentials_path: Some(credentials),
        ..ai_config(provider, endpoint, None)
    }
}

/// Generator with the built-in adapters
pub fn generator(config: AiConfig) -> Arc<RecipeGenerator> {
    init_test_logging();
    Arc::new(RecipeGenerator::new(config))
}

/// Generator with no endpoint, answering from the placeholder
pub fn placeholder_generator() -> Arc<RecipeGenerator> {
    generator(AiConfig::default())
}

/// Router over a placeholder-only generator
pub fn placeholder_router() -> axum::Router {
    smart_recipe_server::routes::build_router(&ServerConfig::default(), placeholder_generator())
}
