//! JWT configuration shared by every validating service.
//!
//! Loaded from environment variables the way the rest of the workspace loads
//! settings: required values fail startup with context, optional values
//! carry their documented defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::key::KeyMaterial;
use crate::validator::DEFAULT_ROLE_CLAIM;

/// Recognized JWT options.
///
/// `key` holds either a shared secret or a PEM-encoded key; which one it is
/// gets decided at resolution time, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    pub key: String,
    pub key_algorithm: Option<String>,
    pub require_audience: Option<String>,
    pub role_claim_name: String,
    pub token_header: String,
}

impl JwtSettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            key: env::var("JWT_KEY").context("JWT_KEY must be set")?,
            key_algorithm: env::var("JWT_KEY_ALGORITHM").ok(),
            require_audience: env::var("JWT_REQUIRE_AUDIENCE").ok(),
            role_claim_name: env::var("JWT_ROLE_CLAIM_NAME")
                .unwrap_or_else(|_| DEFAULT_ROLE_CLAIM.to_string()),
            token_header: env::var("JWT_TOKEN_HEADER")
                .unwrap_or_else(|_| "Authorization".to_string()),
        })
    }

    /// Resolve the configured key. Failures here are startup-fatal: they
    /// mean misconfiguration, not a runtime condition.
    pub fn resolve_key(&self) -> Result<KeyMaterial> {
        KeyMaterial::resolve(&self.key, self.key_algorithm.as_deref())
            .context("failed to resolve JWT key material from JWT_KEY")
    }
}
