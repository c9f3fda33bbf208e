use anyhow::{Context, Result};
use std::env;

use jwt_core::JwtSettings;

/// Gateway configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub jwt: JwtSettings,
    /// Service-level token attached to injected downstream calls.
    pub service_token: String,
    pub resource_url: String,
    pub backend_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            jwt: JwtSettings::from_env()?,
            service_token: env::var("GATEWAY_SERVICE_TOKEN")
                .context("GATEWAY_SERVICE_TOKEN must be set")?,
            resource_url: env::var("RESOURCE_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8082/".to_string()),
            backend_url: env::var("BACKEND_SERVICE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8083/".to_string()),
        })
    }
}
