// ABOUTME: HTTP middleware for cross-origin access and secret-safe logging
// ABOUTME: Provides the CORS layer and redaction helpers used when logging upstream calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

pub mod cors;
pub mod redaction;

// CORS configuration
pub use cors::setup_cors;

// Redaction helpers
pub use redaction::{redact_upstream_body, redact_url, RedactionConfig, RedactionFeatures};
