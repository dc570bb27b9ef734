// ABOUTME: Recipe generation orchestrator sequencing prompt, adapter, upstream call and normalizer
// ABOUTME: Routes every pre-send and transport failure through one placeholder fallback path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! # Recipe Generator
//!
//! ```text
//! NoEndpoint ─────────────────────────────────────────────┐
//! Endpoint → RequestBuilt → Sent ─┬─ 2xx → Normalize ──────┼─→ Return
//!                                 ├─ non-2xx ──────────────┤
//!                                 └─ transport error ──────┴─→ Placeholder
//! ```
//!
//! Each outbound call is attempted once. Failures before or during the
//! exchange yield the placeholder; once a success body is in hand the
//! normalizer always produces a result (structured or degraded).

use std::sync::Arc;

use http::StatusCode;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::normalizer::{Normalized, ResponseNormalizer};
use super::placeholder::placeholder_recipe;
use crate::config::AiConfig;
use crate::llm::{
    build_recipe_prompt, AdapterRegistry, ProviderKind, ProviderTarget, ServiceAccountTokenSource,
};
use crate::middleware::redaction::redact_upstream_body;
use crate::models::{RecipeRequest, RecipeResponse};
use crate::utils::http_client::create_client_with_timeout;

/// Why the generation path fell back to the placeholder
#[derive(Debug, Error)]
pub enum GenerationFailure {
    /// No endpoint configured; an expected mode, not a fault
    #[error("no AI endpoint configured")]
    NoEndpoint,

    /// The configured endpoint is not a valid URL
    #[error("invalid AI endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// Network error or timeout while sending
    #[error("error calling AI endpoint: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("AI endpoint returned {status}")]
    UpstreamStatus {
        /// Status returned upstream
        status: StatusCode,
        /// Response body, already redacted
        body: String,
    },

    /// The response body could not be read
    #[error("failed to read AI response body: {0}")]
    BodyRead(#[source] reqwest::Error),
}

impl GenerationFailure {
    /// Log at the level this failure class calls for
    fn log(&self, provider: ProviderKind) {
        match self {
            Self::NoEndpoint => {
                warn!("AI endpoint not configured; using placeholder generator");
            }
            Self::InvalidEndpoint(e) => {
                error!(error = %e, "AI endpoint is not a valid URL. Falling back to placeholder.");
            }
            Self::Transport(e) | Self::BodyRead(e) => {
                error!(
                    provider = %provider,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Error while calling AI endpoint. Falling back to placeholder."
                );
            }
            Self::UpstreamStatus { status, body } => {
                error!(
                    provider = %provider,
                    status = status.as_u16(),
                    body = %body,
                    "AI endpoint returned non-success status. Falling back to placeholder."
                );
            }
        }
    }
}

/// Generates recipes through the configured provider, never failing to the caller
pub struct RecipeGenerator {
    config: AiConfig,
    client: Client,
    adapters: AdapterRegistry,
    normalizer: ResponseNormalizer,
}

impl RecipeGenerator {
    /// Create a generator with the built-in adapters and a client bounded by the configured timeout
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        let client = create_client_with_timeout(config.request_timeout);
        let tokens = Arc::new(ServiceAccountTokenSource::new(
            config.credentials_path.clone(),
            client.clone(),
        ));
        let adapters = AdapterRegistry::with_defaults(tokens);
        Self::with_adapters(config, client, adapters)
    }

    /// Create a generator with an explicit client and adapter table
    #[must_use]
    pub fn with_adapters(config: AiConfig, client: Client, adapters: AdapterRegistry) -> Self {
        Self {
            config,
            client,
            adapters,
            normalizer: ResponseNormalizer::default(),
        }
    }

    /// Provider configuration in use
    #[must_use]
    pub const fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Generate a recipe for `request`
    ///
    /// Always returns a recipe with a non-empty title.
    #[instrument(skip_all, fields(ingredients = request.ingredients.len()))]
    pub async fn generate(&self, request: &RecipeRequest) -> RecipeResponse {
        match self.attempt(request).await {
            Ok(recipe) => recipe,
            Err((provider, failure)) => {
                failure.log(provider);
                Self::fallback(request)
            }
        }
    }

    /// The single fallback path
    fn fallback(request: &RecipeRequest) -> RecipeResponse {
        placeholder_recipe(request)
    }

    async fn attempt(
        &self,
        request: &RecipeRequest,
    ) -> Result<RecipeResponse, (ProviderKind, GenerationFailure)> {
        let endpoint = self
            .config
            .endpoint
            .as_deref()
            .ok_or((ProviderKind::Generic, GenerationFailure::NoEndpoint))?;
        let endpoint =
            Url::parse(endpoint).map_err(|e| (ProviderKind::Generic, GenerationFailure::from(e)))?;
        let provider = ProviderKind::resolve(&self.config.provider, &endpoint);

        info!(
            provider = %provider,
            endpoint_configured = true,
            api_key_present = self.config.api_key_present(),
            "Calling AI provider"
        );
        if let Some(model) = self.config.model.as_deref() {
            debug!(model, "Configured model identifier (not sent upstream)");
        }

        let prompt = build_recipe_prompt(request);
        let target = ProviderTarget {
            endpoint: &endpoint,
            api_key: self.config.api_key.as_deref(),
        };
        let outbound = self
            .adapters
            .adapter_for(provider)
            .build_request(&target, &prompt)
            .await;

        debug!(
            url = %outbound.redacted_url(),
            bearer = outbound.is_bearer_authenticated(),
            "Sending AI request"
        );

        let response = outbound
            .into_request_builder(&self.client)
            .send()
            .await
            .map_err(|e| (provider, GenerationFailure::Transport(e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| (provider, GenerationFailure::BodyRead(e.without_url())))?;

        match self.normalizer.normalize(status, &body, request) {
            Normalized::Structured { recipe, layer } => {
                info!(provider = %provider, layer, "Parsed AI response");
                Ok(recipe)
            }
            Normalized::Degraded(recipe) => {
                error!(
                    provider = %provider,
                    body_len = body.len(),
                    "Failed to parse AI response. Returning raw output."
                );
                Ok(recipe)
            }
            Normalized::Rejected { status } => Err((
                provider,
                GenerationFailure::UpstreamStatus {
                    status,
                    body: redact_upstream_body(&body),
                },
            )),
        }
    }
}

impl std::fmt::Debug for RecipeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeGenerator")
            .field("config", &self.config)
            .field("adapters", &self.adapters)
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}
