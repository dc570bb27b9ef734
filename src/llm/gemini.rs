// ABOUTME: Google Gemini (Generative Language API) request adapter
// ABOUTME: Builds contents[].parts[] bodies and authenticates by key query parameter or service account
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! # Gemini Adapter
//!
//! Authentication priority:
//!
//! 1. A static API key is appended as the `key` query parameter
//! 2. Otherwise a service-account token is resolved and sent as a bearer token
//! 3. Otherwise the request goes out unauthenticated and fails upstream

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use super::{AccessTokenSource, OutboundRequest, ProviderKind, ProviderTarget, RequestAdapter};

// ============================================================================
// API Request Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

/// Content structure for Gemini API
#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<ContentPart<'a>>,
}

/// Text part of a content entry
#[derive(Debug, Serialize)]
struct ContentPart<'a> {
    text: &'a str,
}

impl<'a> GeminiRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![ContentPart { text: prompt }],
            }],
        }
    }
}

// ============================================================================
// Adapter
// ============================================================================

/// Request adapter for the Google Generative Language API
pub struct GeminiAdapter {
    token_source: Arc<dyn AccessTokenSource>,
}

impl GeminiAdapter {
    /// Create an adapter falling back to `token_source` when no API key is configured
    #[must_use]
    pub fn new(token_source: Arc<dyn AccessTokenSource>) -> Self {
        Self { token_source }
    }

    async fn resolve_bearer(&self) -> Option<String> {
        match self.token_source.access_token().await {
            Ok(token) => {
                debug!("Using service-account bearer token for Gemini");
                Some(token)
            }
            Err(e) if e.is_absent() => {
                warn!(reason = %e, "No API key or service account found for Gemini; call may fail");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to acquire access token from service account");
                None
            }
        }
    }
}

#[async_trait]
impl RequestAdapter for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn build_request(&self, target: &ProviderTarget<'_>, prompt: &str) -> OutboundRequest {
        let mut url = target.endpoint.clone();

        let bearer_token = match target.api_key {
            Some(api_key) => {
                url.query_pairs_mut().append_pair("key", api_key);
                None
            }
            None => self.resolve_bearer().await,
        };

        let body = serde_json::to_value(GeminiRequest::from_prompt(prompt))
            .unwrap_or_else(|_| serde_json::json!({ "contents": [{ "parts": [{ "text": prompt }] }] }));

        OutboundRequest {
            provider: self.kind(),
            url,
            bearer_token,
            body,
        }
    }
}

impl std::fmt::Debug for GeminiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdapter").finish_non_exhaustive()
    }
}
