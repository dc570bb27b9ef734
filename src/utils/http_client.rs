// ABOUTME: Outbound HTTP client construction with timeout configuration
// ABOUTME: Builds the single reqwest client shared by provider calls and token exchange

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::constants::{defaults, service_names};

/// Create the outbound client used for provider and token-endpoint calls
///
/// Every request made through this client is bounded by `timeout`; a request
/// that exceeds it surfaces as a transport error.
///
/// # Arguments
/// * `timeout` - Total request timeout
///
/// # Returns
/// A new `reqwest::Client`, or a default client if the builder fails
#[must_use]
pub fn create_client_with_timeout(timeout: Duration) -> Client {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(defaults::AI_CONNECT_TIMEOUT_SECS)))
        .user_agent(concat!("smart-recipe-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(
                service = service_names::SMART_RECIPE_SERVER,
                error = %e,
                "Failed to build configured HTTP client, using defaults"
            );
            Client::new()
        })
}
