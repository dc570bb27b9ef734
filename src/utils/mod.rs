// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains the shared outbound HTTP client builder and JSON key folding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

/// HTTP client configuration and helpers
pub mod http_client;
/// Case-insensitive JSON decoding helpers
pub mod json;
