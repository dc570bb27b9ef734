// ABOUTME: Google service-account credential resolver for the Gemini request adapter
// ABOUTME: Signs an RS256 JWT assertion and exchanges it for a short-lived bearer token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Recipe Generator Contributors

//! # Credential Resolver
//!
//! Resolves a bearer token from the service-account file named by
//! `GOOGLE_APPLICATION_CREDENTIALS`, using the OAuth 2.0 JWT bearer grant:
//!
//! 1. Read and parse the service-account JSON
//! 2. Sign an RS256 assertion scoped to the Generative Language API
//! 3. `POST` it to the file's `token_uri` and read `access_token`
//!
//! Every failure is returned as a [`CredentialError`]; callers log it and
//! carry on unauthenticated. Tokens are not cached: each generation request
//! resolves its own.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::constants::google::{
    ASSERTION_LIFETIME_SECS, DEFAULT_TOKEN_URI, GENERATIVE_LANGUAGE_SCOPE, JWT_BEARER_GRANT,
};

/// Why a bearer token could not be resolved
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No credential file path is configured
    #[error("no service-account credential file configured")]
    NotConfigured,

    /// The configured path does not exist
    #[error("service-account credential file not found: {0}")]
    MissingFile(PathBuf),

    /// The file could not be read
    #[error("failed to read service-account credential file: {0}")]
    Read(#[source] std::io::Error),

    /// The file is not a usable service-account credential
    #[error("malformed service-account credential: {0}")]
    Malformed(String),

    /// The assertion could not be signed
    #[error("failed to sign service-account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The token endpoint could not be reached or rejected the assertion
    #[error("token exchange failed: {0}")]
    Exchange(String),
}

impl CredentialError {
    /// Whether the failure only means "nothing configured" rather than a broken credential
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::MissingFile(_))
    }
}

/// Source of bearer tokens for providers that accept them
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// Resolve a fresh access token
    async fn access_token(&self) -> Result<String, CredentialError>;
}

/// Relevant fields of a Google service-account key file
#[derive(Deserialize)]
struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    key_type: Option<String>,
    client_email: String,
    private_key: String,
    #[serde(default)]
    private_key_id: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
}

/// Claims of the signed JWT assertion
#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Token endpoint response
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Resolves tokens by exchanging a service-account key file
pub struct ServiceAccountTokenSource {
    credentials_path: Option<PathBuf>,
    client: Client,
}

impl ServiceAccountTokenSource {
    /// Create a source reading `credentials_path`, sending exchanges through `client`
    #[must_use]
    pub fn new(credentials_path: Option<PathBuf>, client: Client) -> Self {
        Self {
            credentials_path,
            client,
        }
    }

    async fn load_key(path: &Path) -> Result<ServiceAccountKey, CredentialError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(CredentialError::MissingFile(path.to_path_buf()));
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(CredentialError::Read)?;

        let key: ServiceAccountKey = serde_json::from_str(&contents)
            .map_err(|e| CredentialError::Malformed(e.to_string()))?;

        if let Some(key_type) = key.key_type.as_deref() {
            if key_type != "service_account" {
                return Err(CredentialError::Malformed(format!(
                    "expected type \"service_account\", found \"{key_type}\""
                )));
            }
        }

        Ok(key)
    }

    fn sign_assertion(key: &ServiceAccountKey, token_uri: &str) -> Result<String, CredentialError> {
        let iat = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &key.client_email,
            scope: GENERATIVE_LANGUAGE_SCOPE,
            aud: token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&key.private_key_id);

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| CredentialError::Malformed(format!("invalid private key: {e}")))?;

        Ok(encode(&header, &claims, &encoding_key)?)
    }

    async fn exchange(&self, token_uri: &str, assertion: &str) -> Result<String, CredentialError> {
        let response = self
            .client
            .post(token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .send()
            .await
            .map_err(|e| CredentialError::Exchange(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::Exchange(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialError::Exchange(format!("unreadable token response: {e}")))?;

        if token.access_token.trim().is_empty() {
            return Err(CredentialError::Exchange(
                "token endpoint returned an empty access token".to_owned(),
            ));
        }

        Ok(token.access_token)
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokenSource {
    #[instrument(skip(self))]
    async fn access_token(&self) -> Result<String, CredentialError> {
        let path = self
            .credentials_path
            .as_deref()
            .ok_or(CredentialError::NotConfigured)?;

        let key = Self::load_key(path).await?;
        let token_uri = key
            .token_uri
            .clone()
            .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_owned());

        let assertion = Self::sign_assertion(&key, &token_uri)?;
        let token = self.exchange(&token_uri, &assertion).await?;

        debug!(client_email = %key.client_email, "Obtained service-account access token");
        Ok(token)
    }
}

impl std::fmt::Debug for ServiceAccountTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountTokenSource")
            .field("credentials_path", &self.credentials_path)
            .finish_non_exhaustive()
    }
}
