// ABOUTME: Layered server configuration from defaults, an optional settings file and the environment
// ABOUTME: Produces ServerConfig with the AI provider, HTTP bind and CORS settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! Environment-based configuration management
//!
//! Precedence, lowest first: built-in defaults, the settings file
//! (`--config` or `RECIPE_SETTINGS_FILE`), environment variables, CLI flags
//! (applied by the binary). Blank values count as absent at every layer.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::{defaults, env_keys};
use crate::utils::json::{fold_keys, null_as_default};

// ============================================================================
// Settings File
// ============================================================================

/// `AI` section of a settings file; keys match case-insensitively
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiSection {
    /// Provider identifier
    #[serde(default)]
    pub provider: Option<String>,
    /// Upstream endpoint URL
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Static API key
    #[serde(default, alias = "api_key")]
    pub apikey: Option<String>,
    /// Model identifier
    #[serde(default)]
    pub model: Option<String>,
    /// Outbound timeout in seconds
    #[serde(default, alias = "timeout_secs")]
    pub timeoutsecs: Option<u64>,
}

/// Parsed settings file (JSON or YAML)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    /// AI provider settings
    #[serde(default, deserialize_with = "null_as_default")]
    pub ai: AiSection,
}

impl SettingsFile {
    /// Parse settings from JSON or YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is neither valid YAML nor JSON, or if the
    /// `AI` section has the wrong shape.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        // YAML is a superset of JSON, one parser covers both formats
        let value: serde_json::Value =
            serde_yaml::from_str(text).context("Settings file is not valid JSON or YAML")?;
        if value.is_null() {
            return Ok(Self::default());
        }

        serde_json::from_value(fold_keys(value)).context("Settings file has an invalid AI section")
    }

    /// Read and parse the settings file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings file {}", path.display()))
    }
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Upstream LLM provider configuration
#[derive(Clone)]
pub struct AiConfig {
    /// Provider identifier, lower-cased; empty selects the generic adapter
    pub provider: String,
    /// Upstream endpoint; `None` selects placeholder-only mode
    pub endpoint: Option<String>,
    /// Optional static API key
    pub api_key: Option<String>,
    /// Optional model identifier (logged, not sent)
    pub model: Option<String>,
    /// Bound on every outbound call
    pub request_timeout: Duration,
    /// Service-account credential file for the Gemini adapter
    pub credentials_path: Option<PathBuf>,
}

impl AiConfig {
    /// Whether an upstream endpoint is configured
    #[must_use]
    pub const fn has_endpoint(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Whether a static API key is configured
    #[must_use]
    pub const fn api_key_present(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: String::new(),
            endpoint: None,
            api_key: None,
            model: None,
            request_timeout: Duration::from_secs(defaults::AI_TIMEOUT_SECS),
            credentials_path: None,
        }
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("credentials_path", &self.credentials_path)
            .finish()
    }
}

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub http_host: String,
    /// Bind port
    pub http_port: u16,
    /// Upstream provider settings
    pub ai: AiConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: defaults::HTTP_HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            ai: AiConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file named by `RECIPE_SETTINGS_FILE`
    /// cannot be loaded or a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load configuration with an explicit settings file taking priority over `RECIPE_SETTINGS_FILE`
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded or a numeric
    /// variable does not parse.
    pub fn load(settings_path: Option<&Path>) -> Result<Self> {
        info!("Loading configuration from environment variables");

        let settings_path = settings_path
            .map(Path::to_path_buf)
            .or_else(|| non_blank(env::var(env_keys::SETTINGS_FILE).ok()).map(PathBuf::from));

        let settings = match settings_path {
            Some(path) => {
                debug!(path = %path.display(), "Reading settings file");
                SettingsFile::from_path(&path)?
            }
            None => SettingsFile::default(),
        };

        Self::from_sources(&settings, |key| env::var(key).ok())
    }

    /// Merge a settings file with an environment lookup
    ///
    /// # Errors
    ///
    /// Returns an error if `HTTP_PORT` or `AI_TIMEOUT_SECS` is set but not a number.
    pub fn from_sources<F>(settings: &SettingsFile, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_of = |keys: &[&str]| keys.iter().find_map(|key| non_blank(lookup(key)));
        let section = &settings.ai;

        let provider = first_of(env_keys::AI_PROVIDER)
            .or_else(|| non_blank(section.provider.clone()))
            .unwrap_or_default()
            .to_lowercase();

        let request_timeout_secs = match non_blank(lookup(env_keys::AI_TIMEOUT_SECS)) {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("Invalid {} value: {raw}", env_keys::AI_TIMEOUT_SECS))?,
            None => section.timeoutsecs.unwrap_or(defaults::AI_TIMEOUT_SECS),
        };

        let http_port = match non_blank(lookup(env_keys::HTTP_PORT)) {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid {} value: {raw}", env_keys::HTTP_PORT))?,
            None => defaults::HTTP_PORT,
        };

        Ok(Self {
            http_host: non_blank(lookup(env_keys::HTTP_HOST))
                .unwrap_or_else(|| defaults::HTTP_HOST.to_owned()),
            http_port,
            ai: AiConfig {
                provider,
                endpoint: first_of(env_keys::AI_ENDPOINT)
                    .or_else(|| non_blank(section.endpoint.clone())),
                api_key: first_of(env_keys::AI_API_KEY)
                    .or_else(|| non_blank(section.apikey.clone())),
                model: first_of(env_keys::AI_MODEL).or_else(|| non_blank(section.model.clone())),
                request_timeout: Duration::from_secs(request_timeout_secs.max(1)),
                credentials_path: non_blank(lookup(env_keys::GOOGLE_APPLICATION_CREDENTIALS))
                    .map(PathBuf::from),
            },
            cors: CorsConfig {
                allowed_origins: non_blank(lookup(env_keys::CORS_ALLOWED_ORIGINS))
                    .map_or_else(|| CorsConfig::default().allowed_origins, |raw| parse_origins(&raw)),
            },
        })
    }

    /// Socket address string to bind
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Smart Recipe Server Configuration:\n\
             - HTTP: {}\n\
             - AI Provider: {}\n\
             - AI Endpoint: {}\n\
             - AI API Key: {}\n\
             - Service Account: {}\n\
             - Timeout: {}s\n\
             - CORS Origins: {}",
            self.bind_address(),
            if self.ai.provider.is_empty() {
                "generic"
            } else {
                self.ai.provider.as_str()
            },
            if self.ai.has_endpoint() {
                "Configured"
            } else {
                "Not configured (placeholder mode)"
            },
            if self.ai.api_key_present() {
                "Present"
            } else {
                "Absent"
            },
            if self.ai.credentials_path.is_some() {
                "Configured"
            } else {
                "Not configured"
            },
            self.ai.request_timeout.as_secs(),
            self.cors.allowed_origins.join(", "),
        )
    }
}

/// Treat blank strings as absent and trim the rest
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
