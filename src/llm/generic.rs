// ABOUTME: Generic bearer-token request adapter for unrecognised providers
// ABOUTME: Sends { "inputs": ... } and attaches a static API key as a bearer token when present
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

use async_trait::async_trait;

use super::{OutboundRequest, ProviderKind, ProviderTarget, RequestAdapter};

/// Request adapter for any endpoint without a dedicated adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericAdapter;

#[async_trait]
impl RequestAdapter for GenericAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Generic
    }

    async fn build_request(&self, target: &ProviderTarget<'_>, prompt: &str) -> OutboundRequest {
        OutboundRequest {
            provider: self.kind(),
            url: target.endpoint.clone(),
            bearer_token: target.api_key.map(str::to_owned),
            body: serde_json::json!({ "inputs": prompt }),
        }
    }
}
