// ABOUTME: Hugging Face inference API request adapter
// ABOUTME: Sends the prompt as { "inputs": ... } with an optional bearer API key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

use async_trait::async_trait;
use tracing::debug;

use super::{OutboundRequest, ProviderKind, ProviderTarget, RequestAdapter};

/// Request adapter for the Hugging Face inference API
#[derive(Debug, Clone, Copy, Default)]
pub struct HuggingFaceAdapter;

#[async_trait]
impl RequestAdapter for HuggingFaceAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    async fn build_request(&self, target: &ProviderTarget<'_>, prompt: &str) -> OutboundRequest {
        debug!(
            api_key_present = target.api_key.is_some(),
            "Building Hugging Face request"
        );

        OutboundRequest {
            provider: self.kind(),
            url: target.endpoint.clone(),
            bearer_token: target.api_key.map(str::to_owned),
            body: serde_json::json!({ "inputs": prompt }),
        }
    }
}
