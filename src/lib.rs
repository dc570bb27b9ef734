// ABOUTME: Main library entry point for the Smart Recipe Generator API
// ABOUTME: Turns an ingredient list into an LLM-generated recipe with a guaranteed local fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

#![deny(unsafe_code)]

//! # Smart Recipe Server
//!
//! A small HTTP API that accepts a list of ingredients plus optional dietary
//! preferences and returns a generated recipe (title, ingredients, steps and a
//! nutrition estimate).
//!
//! Generation is delegated to a configurable LLM provider (Hugging Face,
//! Google Gemini, or any bearer-token endpoint accepting `{ "inputs": ... }`).
//! When no provider is configured, or the call fails, a deterministic local
//! placeholder generator answers instead, so callers always receive a
//! well-formed recipe.
//!
//! ## Architecture
//!
//! - **`llm`**: prompt builder, per-provider request adapters, credential resolver
//! - **`recipes`**: response normalizer, placeholder generator, orchestrator
//! - **`routes`**: axum HTTP surface
//! - **`config`**: layered settings (file, environment, CLI)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use smart_recipe_server::config::environment::ServerConfig;
//! use smart_recipe_server::models::RecipeRequest;
//! use smart_recipe_server::recipes::RecipeGenerator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let generator = RecipeGenerator::new(config.ai.clone());
//!
//!     let request = RecipeRequest::new(vec!["egg".into(), "rice".into()]);
//!     let recipe = generator.generate(&request).await;
//!     println!("{}", recipe.title);
//!     Ok(())
//! }
//! ```

/// Layered configuration (settings file, environment, CLI)
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// LLM prompt construction, provider request adapters and credentials
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware (CORS, log redaction)
pub mod middleware;

/// Recipe request/response data model
pub mod models;

/// Recipe generation pipeline: normalizer, placeholder, orchestrator
pub mod recipes;

/// `HTTP` routes for the recipe API and health checks
pub mod routes;

/// Utility functions and helpers
pub mod utils;
