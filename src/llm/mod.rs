// ABOUTME: Provider request adapter layer for pluggable LLM backends
// ABOUTME: Defines provider identifiers, the outbound request shape and the adapter dispatch table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! # Provider Request Adapters
//!
//! Each upstream LLM family expects a different body shape and
//! authentication mechanism. This module turns a provider identifier, an
//! endpoint, optional credentials and a prompt into a fully-formed
//! [`OutboundRequest`].
//!
//! ## Key Concepts
//!
//! - **`ProviderKind`**: which adapter family a configuration selects
//! - **`RequestAdapter`**: async strategy trait, one implementation per family
//! - **`AdapterRegistry`**: dispatch table from `ProviderKind` to adapter
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use smart_recipe_server::llm::{
//!     AdapterRegistry, ProviderKind, ProviderTarget, RequestAdapter, ServiceAccountTokenSource,
//! };
//!
//! async fn example() -> Result<(), url::ParseError> {
//!     let client = reqwest::Client::new();
//!     let tokens = Arc::new(ServiceAccountTokenSource::new(None, client));
//!     let registry = AdapterRegistry::with_defaults(tokens);
//!
//!     let endpoint = url::Url::parse("https://api-inference.huggingface.co/models/x")?;
//!     let kind = ProviderKind::resolve("huggingface", &endpoint);
//!     let target = ProviderTarget { endpoint: &endpoint, api_key: Some("hf_...") };
//!     let request = registry.adapter_for(kind).build_request(&target, "prompt").await;
//!     println!("{}", request.redacted_url());
//!     Ok(())
//! }
//! ```

pub mod credentials;
mod gemini;
mod generic;
mod huggingface;
pub mod prompts;

pub use credentials::{AccessTokenSource, CredentialError, ServiceAccountTokenSource};
pub use gemini::GeminiAdapter;
pub use generic::GenericAdapter;
pub use huggingface::HuggingFaceAdapter;
pub use prompts::build_recipe_prompt;

use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use url::Url;

use crate::constants::google::GENERATIVE_LANGUAGE_HOST;
use crate::middleware::redaction::redact_url;

// ============================================================================
// Provider Identifier
// ============================================================================

/// Upstream provider family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Hugging Face inference API (`{ "inputs": ... }`, bearer key)
    HuggingFace,
    /// Google Generative Language API (`contents[].parts[]`, key query or service account)
    Gemini,
    /// Any other endpoint accepting `{ "inputs": ... }` with an optional bearer key
    Generic,
}

impl ProviderKind {
    /// Select the adapter family for a configured provider string and endpoint
    ///
    /// Matching is case-insensitive. `gemini` and `google` are synonyms, and an
    /// endpoint on the Google Generative Language host selects Gemini even
    /// when the provider string says otherwise (unless it names Hugging Face).
    #[must_use]
    pub fn resolve(provider: &str, endpoint: &Url) -> Self {
        match provider.trim().to_lowercase().as_str() {
            "huggingface" => Self::HuggingFace,
            "gemini" | "google" => Self::Gemini,
            _ if endpoint.host_str() == Some(GENERATIVE_LANGUAGE_HOST) => Self::Gemini,
            _ => Self::Generic,
        }
    }

    /// Identifier used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HuggingFace => "huggingface",
            Self::Gemini => "gemini",
            Self::Generic => "generic",
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request Types
// ============================================================================

/// Where and with which static credential to send a prompt
#[derive(Clone, Copy)]
pub struct ProviderTarget<'a> {
    /// Parsed upstream endpoint
    pub endpoint: &'a Url,
    /// Optional static API key
    pub api_key: Option<&'a str>,
}

impl Debug for ProviderTarget<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderTarget")
            .field("endpoint", &redact_url(self.endpoint))
            .field("api_key_present", &self.api_key.is_some())
            .finish()
    }
}

/// A fully-formed request ready to be sent upstream
#[derive(Clone)]
pub struct OutboundRequest {
    /// Adapter family that built the request
    pub provider: ProviderKind,
    /// Final target URL, including any credential query parameter
    pub url: Url,
    /// Bearer token for the `Authorization` header
    pub bearer_token: Option<String>,
    /// JSON body
    pub body: serde_json::Value,
}

impl OutboundRequest {
    /// Target URL with credential-bearing query values masked, safe to log
    #[must_use]
    pub fn redacted_url(&self) -> String {
        redact_url(&self.url)
    }

    /// Whether an `Authorization` header will be attached
    #[must_use]
    pub const fn is_bearer_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Build the `POST` for this request on `client`
    #[must_use]
    pub fn into_request_builder(self, client: &Client) -> RequestBuilder {
        let builder = client.post(self.url).json(&self.body);
        match self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl Debug for OutboundRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("provider", &self.provider)
            .field("url", &self.redacted_url())
            .field("bearer_token_present", &self.bearer_token.is_some())
            .field("body", &self.body)
            .finish()
    }
}

// ============================================================================
// Adapter Trait
// ============================================================================

/// Strategy that shapes a prompt into a provider-specific request
///
/// Building never fails: credential problems are logged and the request is
/// sent without them, so the upstream call fails visibly downstream.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    /// Provider family served by this adapter
    fn kind(&self) -> ProviderKind;

    /// Build the outbound request for `prompt`
    async fn build_request(&self, target: &ProviderTarget<'_>, prompt: &str) -> OutboundRequest;
}

// ============================================================================
// Adapter Registry
// ============================================================================

/// Dispatch table from provider family to adapter
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<ProviderKind, Arc<dyn RequestAdapter>>,
    fallback: Arc<dyn RequestAdapter>,
}

impl AdapterRegistry {
    /// Create a registry holding only the generic adapter
    #[must_use]
    pub fn new() -> Self {
        let fallback: Arc<dyn RequestAdapter> = Arc::new(GenericAdapter);
        let mut adapters = HashMap::new();
        adapters.insert(ProviderKind::Generic, Arc::clone(&fallback));
        Self { adapters, fallback }
    }

    /// Create a registry with the built-in adapters for every provider family
    #[must_use]
    pub fn with_defaults(token_source: Arc<dyn AccessTokenSource>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HuggingFaceAdapter));
        registry.register(Arc::new(GeminiAdapter::new(token_source)));
        registry
    }

    /// Register (or replace) the adapter for its provider family
    pub fn register(&mut self, adapter: Arc<dyn RequestAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    /// Adapter for `kind`, or the generic adapter when none is registered
    #[must_use]
    pub fn adapter_for(&self, kind: ProviderKind) -> &dyn RequestAdapter {
        self.adapters
            .get(&kind)
            .unwrap_or(&self.fallback)
            .as_ref()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for AdapterRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("providers", &self.adapters.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
