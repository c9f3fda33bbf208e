use anyhow::{Context, Result};
use std::env;

use jwt_core::JwtSettings;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub jwt: JwtSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8083".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            jwt: JwtSettings::from_env()?,
        })
    }
}
