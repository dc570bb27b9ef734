// ABOUTME: Secret redaction helpers for log lines about outbound provider calls
// ABOUTME: Masks credential query parameters, sensitive JSON fields and bearer tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! Redaction of credentials before they reach a log line
//!
//! API keys travel in the Gemini URL query and token endpoints echo secrets
//! in error bodies. Everything logged about an upstream exchange goes
//! through one of these helpers first.
//!
//! ## Usage
//!
//! ```rust
//! use smart_recipe_server::middleware::redaction::redact_url;
//!
//! let url = url::Url::parse("https://example.com/v1/models?key=abc123&alt=json").unwrap();
//! assert_eq!(
//!     redact_url(&url),
//!     "https://example.com/v1/models?key=[REDACTED]&alt=json"
//! );
//! ```

use std::borrow::Cow;
use std::sync::OnceLock;

use bitflags::bitflags;
use regex::Regex;
use url::Url;

bitflags! {
    /// Which kinds of secret to redact
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RedactionFeatures: u8 {
        /// Credential-bearing URL query parameters
        const QUERY_PARAMS = 0b0001;
        /// Sensitive JSON body fields
        const BODY_FIELDS = 0b0010;
        /// Bearer tokens in free text
        const TOKENS = 0b0100;
        /// Enable all redaction features
        const ALL = Self::QUERY_PARAMS.bits() | Self::BODY_FIELDS.bits() | Self::TOKENS.bits();
    }
}

/// Configuration for secret redaction
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    /// Which redaction features to enable
    pub features: RedactionFeatures,
    /// Replacement string for redacted values
    pub redaction_placeholder: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            features: RedactionFeatures::ALL,
            redaction_placeholder: REDACTED.to_owned(),
        }
    }
}

const REDACTED: &str = "[REDACTED]";

/// Query parameters whose values are credentials
const SENSITIVE_QUERY_PARAMS: &[&str] = &["key", "api_key", "apikey", "token", "access_token"];

/// JSON fields whose values are credentials
const SENSITIVE_FIELDS: &[&str] = &[
    "access_token",
    "accessToken",
    "refresh_token",
    "id_token",
    "api_key",
    "apiKey",
    "assertion",
    "private_key",
    "client_secret",
];

/// Render `url` with credential query values masked, using the default placeholder
#[must_use]
pub fn redact_url(url: &Url) -> String {
    redact_url_with(url, &RedactionConfig::default())
}

/// Render `url` with credential query values masked
#[must_use]
pub fn redact_url_with(url: &Url, config: &RedactionConfig) -> String {
    if !config.features.contains(RedactionFeatures::QUERY_PARAMS) || url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<String> = url
        .query_pairs()
        .map(|(name, value)| {
            let value: Cow<'_, str> = if SENSITIVE_QUERY_PARAMS
                .iter()
                .any(|sensitive| name.eq_ignore_ascii_case(sensitive))
            {
                Cow::Borrowed(config.redaction_placeholder.as_str())
            } else {
                value
            };
            format!("{name}={value}")
        })
        .collect();

    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    format!("{base}?{}", pairs.join("&"))
}

/// Redact sensitive field values in JSON-like text
#[must_use]
pub fn redact_json_fields(text: &str, config: &RedactionConfig) -> String {
    if !config.features.contains(RedactionFeatures::BODY_FIELDS) {
        return text.to_owned();
    }

    let Some(re) = sensitive_field_regex() else {
        return text.to_owned();
    };

    re.replace_all(text, |caps: &regex::Captures<'_>| {
        format!(r#""{}": "{}""#, &caps[1], config.redaction_placeholder)
    })
    .into_owned()
}

/// Redact bearer tokens in free text
#[must_use]
pub fn redact_token_patterns(text: &str, config: &RedactionConfig) -> String {
    if !config.features.contains(RedactionFeatures::TOKENS) {
        return text.to_owned();
    }

    bearer_regex().map_or_else(
        || text.to_owned(),
        |re| {
            re.replace_all(text, format!("Bearer {}", config.redaction_placeholder))
                .into_owned()
        },
    )
}

/// Redact everything a provider error body may echo back
#[must_use]
pub fn redact_upstream_body(text: &str) -> String {
    let config = RedactionConfig::default();
    redact_token_patterns(&redact_json_fields(text, &config), &config)
}

/// Compiled `"field": "value"` matcher (cached)
fn sensitive_field_regex() -> Option<&'static Regex> {
    static FIELD_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    FIELD_REGEX
        .get_or_init(|| {
            let fields = SENSITIVE_FIELDS.join("|");
            Regex::new(&format!(r#""({fields})"\s*:\s*"[^"]*""#)).ok()
        })
        .as_ref()
}

/// Compiled bearer token matcher (cached)
fn bearer_regex() -> Option<&'static Regex> {
    static BEARER_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    BEARER_REGEX
        .get_or_init(|| Regex::new(r"Bearer\s+[A-Za-z0-9\-._~+/]+=*").ok())
        .as_ref()
}
