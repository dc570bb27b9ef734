// ABOUTME: System-wide constants and configuration defaults for the recipe API
// ABOUTME: Groups service identity, configuration keys, provider hosts and fallback labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! # Constants Module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Service identity
pub mod service_names {
    /// Service name used in logs and the banner endpoint
    pub const SMART_RECIPE_SERVER: &str = "smart-recipe-server";

    /// Plain-text banner returned by `GET /api/recipes`
    pub const API_BANNER: &str = "Smart Recipe Generator API";
}

/// Environment variable names
pub mod env_keys {
    /// Provider identifier (`huggingface`, `gemini`, `google`, anything else)
    pub const AI_PROVIDER: &[&str] = &["AI__PROVIDER", "AI_PROVIDER"];

    /// Upstream endpoint URL; absence selects placeholder-only mode
    pub const AI_ENDPOINT: &[&str] = &["AI__ENDPOINT", "AI_ENDPOINT"];

    /// Optional static API key
    pub const AI_API_KEY: &[&str] = &["AI__APIKEY", "AI__API_KEY", "AI_API_KEY"];

    /// Optional model identifier
    pub const AI_MODEL: &[&str] = &["AI__MODEL", "AI_MODEL"];

    /// Outbound request timeout in seconds
    pub const AI_TIMEOUT_SECS: &str = "AI_TIMEOUT_SECS";

    /// Path to a Google service-account credential file
    pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

    /// Optional settings file (JSON or YAML)
    pub const SETTINGS_FILE: &str = "RECIPE_SETTINGS_FILE";

    /// Bind address
    pub const HTTP_HOST: &str = "HTTP_HOST";

    /// Bind port
    pub const HTTP_PORT: &str = "HTTP_PORT";

    /// Comma-separated CORS origins, or `*`
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
}

/// Server defaults
pub mod defaults {
    /// Default bind address
    pub const HTTP_HOST: &str = "0.0.0.0";

    /// Default bind port
    pub const HTTP_PORT: u16 = 8080;

    /// Default outbound timeout for provider and token calls
    pub const AI_TIMEOUT_SECS: u64 = 30;

    /// Connection timeout for the outbound client
    pub const AI_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Maximum accepted request body
    pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
}

/// Google-specific values
pub mod google {
    /// Host of the Google Generative Language API
    pub const GENERATIVE_LANGUAGE_HOST: &str = "generativelanguage.googleapis.com";

    /// OAuth scope requested for service-account tokens
    pub const GENERATIVE_LANGUAGE_SCOPE: &str =
        "https://www.googleapis.com/auth/generative-language.retriever";

    /// Token endpoint used when the credential file omits `token_uri`
    pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

    /// OAuth 2.0 JWT bearer grant type
    pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

    /// Lifetime requested for the signed assertion
    pub const ASSERTION_LIFETIME_SECS: i64 = 3600;
}

/// Recipe generation labels and placeholder formula
pub mod recipes {
    /// Title given to a degraded result wrapping unparseable provider output
    pub const AI_FALLBACK_TITLE: &str = "AI generated result";

    /// Title used by the placeholder when no ingredients are available
    pub const GENERIC_TITLE: &str = "Quick Recipe";

    /// Calories per ingredient in the placeholder estimate
    pub const CALORIES_PER_INGREDIENT: i64 = 120;

    /// Protein grams per ingredient in the placeholder estimate
    pub const PROTEIN_PER_INGREDIENT: f64 = 3.5;

    /// Fat grams per ingredient in the placeholder estimate
    pub const FAT_PER_INGREDIENT: f64 = 5.0;

    /// Carbohydrate grams per ingredient in the placeholder estimate
    pub const CARBS_PER_INGREDIENT: f64 = 12.0;

    /// Validation message for an empty ingredient list
    pub const MISSING_INGREDIENTS_MESSAGE: &str = "Please provide a list of ingredients.";
}
