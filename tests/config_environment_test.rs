// ABOUTME: Integration tests for layered configuration loading from files and process environment
// ABOUTME: Serialized because they mutate environment variables shared by the test process
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use smart_recipe_server::config::ServerConfig;
use tempfile::NamedTempFile;

const MANAGED_VARS: &[&str] = &[
    "AI__PROVIDER",
    "AI_PROVIDER",
    "AI__ENDPOINT",
    "AI_ENDPOINT",
    "AI__APIKEY",
    "AI__API_KEY",
    "AI_API_KEY",
    "AI__MODEL",
    "AI_MODEL",
    "AI_TIMEOUT_SECS",
    "GOOGLE_APPLICATION_CREDENTIALS",
    "RECIPE_SETTINGS_FILE",
    "HTTP_HOST",
    "HTTP_PORT",
    "CORS_ALLOWED_ORIGINS",
];

/// Clears every configuration variable on creation and again on drop
struct CleanEnv;

impl CleanEnv {
    fn new() -> Self {
        Self::clear();
        Self
    }

    fn set(&self, key: &str, value: &str) {
        env::set_var(key, value);
    }

    fn clear() {
        for key in MANAGED_VARS {
            env::remove_var(key);
        }
    }
}

impl Drop for CleanEnv {
    fn drop(&mut self) {
        Self::clear();
    }
}

fn settings_file(extension: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(extension).tempfile().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
#[serial]
fn test_from_env_defaults() {
    let _env = CleanEnv::new();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.bind_address(), "0.0.0.0:8080");
    assert!(config.ai.endpoint.is_none());
    assert!(config.ai.api_key.is_none());
    assert_eq!(config.ai.request_timeout, Duration::from_secs(30));
    assert!(config.summary().contains("placeholder mode"));
}

#[test]
#[serial]
fn test_from_env_reads_double_underscore_keys() {
    let env_guard = CleanEnv::new();
    env_guard.set("AI__PROVIDER", "Gemini");
    env_guard.set("AI__ENDPOINT", "https://generativelanguage.googleapis.com/v1beta/models/m:generateContent");
    env_guard.set("AI__APIKEY", "AIza-secret");
    env_guard.set("AI__MODEL", "gemini-pro");
    env_guard.set("AI_TIMEOUT_SECS", "12");
    env_guard.set("GOOGLE_APPLICATION_CREDENTIALS", "/etc/sa.json");
    env_guard.set("HTTP_PORT", "9090");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.ai.provider, "gemini");
    assert_eq!(config.ai.api_key.as_deref(), Some("AIza-secret"));
    assert_eq!(config.ai.model.as_deref(), Some("gemini-pro"));
    assert_eq!(config.ai.request_timeout, Duration::from_secs(12));
    assert_eq!(config.ai.credentials_path, Some(PathBuf::from("/etc/sa.json")));
    assert_eq!(config.http_port, 9090);

    let summary = config.summary();
    assert!(!summary.contains("AIza-secret"));
    assert!(summary.contains("AI API Key: Present"));
}

#[test]
#[serial]
fn test_blank_values_are_absent() {
    let env_guard = CleanEnv::new();
    env_guard.set("AI_ENDPOINT", "   ");
    env_guard.set("AI_API_KEY", "");

    let config = ServerConfig::from_env().unwrap();

    assert!(config.ai.endpoint.is_none());
    assert!(config.ai.api_key.is_none());
}

#[test]
#[serial]
fn test_settings_file_from_environment_variable() {
    let env_guard = CleanEnv::new();
    let file = settings_file(
        ".json",
        r#"{ "AI": { "Provider": "huggingface", "Endpoint": "https://api-inference.huggingface.co/models/x", "ApiKey": "hf_file" } }"#,
    );
    env_guard.set("RECIPE_SETTINGS_FILE", file.path().to_str().unwrap());

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.ai.provider, "huggingface");
    assert_eq!(
        config.ai.endpoint.as_deref(),
        Some("https://api-inference.huggingface.co/models/x")
    );
    assert_eq!(config.ai.api_key.as_deref(), Some("hf_file"));
}

#[test]
#[serial]
fn test_explicit_yaml_file_with_environment_override() {
    let env_guard = CleanEnv::new();
    let file = settings_file(
        ".yaml",
        "AI:\n  Provider: huggingface\n  Endpoint: https://file.example/models/x\n  Model: zephyr\n",
    );
    env_guard.set("AI_MODEL", "mistral");

    let config = ServerConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.ai.endpoint.as_deref(), Some("https://file.example/models/x"));
    assert_eq!(config.ai.model.as_deref(), Some("mistral"));
}

#[test]
#[serial]
fn test_missing_settings_file_is_an_error() {
    let _env = CleanEnv::new();
    let dir = tempfile::tempdir().unwrap();

    let result = ServerConfig::load(Some(&dir.path().join("missing.yaml")));

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_timeout_is_an_error() {
    let env_guard = CleanEnv::new();
    env_guard.set("AI_TIMEOUT_SECS", "soon");

    assert!(ServerConfig::from_env().is_err());
}

#[test]
#[serial]
fn test_cors_origins_from_environment() {
    let env_guard = CleanEnv::new();
    env_guard.set("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(
        config.cors.allowed_origins,
        vec!["https://a.example", "https://b.example"]
    );
}
