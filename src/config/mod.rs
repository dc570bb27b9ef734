// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the layered ServerConfig and its AI provider and CORS sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! Configuration module for the Smart Recipe Server
//!
//! - **Environment**: server, AI provider and CORS settings layered from
//!   defaults, a settings file and environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{AiConfig, AiSection, CorsConfig, ServerConfig, SettingsFile};
