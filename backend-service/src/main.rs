//! Backend Service Main Entry Point
//!
//! Serves the gateway-only endpoints behind bearer authentication.

use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use auth_middleware::{BearerAuth, ProviderChain};
use backend_service::config::Settings;
use jwt_core::TokenValidator;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "backend_service=info,info".into()),
        )
        .with_target(false)
        .init();

    let settings = Settings::from_env().context("failed to load backend-service settings")?;
    let key = settings.jwt.resolve_key()?;
    let validator = Arc::new(TokenValidator::new(
        key,
        settings.jwt.require_audience.clone(),
        Some(settings.jwt.role_claim_name.clone()),
    ));

    info!(host = %settings.host, port = settings.port, "starting backend-service");

    let token_header = settings.jwt.token_header.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(
                BearerAuth::new(ProviderChain::jwt(validator.clone()))
                    .with_header_name(token_header.clone()),
            )
            .configure(backend_service::configure)
    })
    .bind((settings.host.as_str(), settings.port))
    .context("failed to bind backend-service listener")?
    .run()
    .await?;

    Ok(())
}
