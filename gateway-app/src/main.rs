//! Gateway Main Entry Point
//!
//! Validates bearer tokens on every inbound request and calls the resource
//! and backend services with the appropriate outbound credential.

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use auth_middleware::{BearerAuth, ProviderChain};
use credential_propagation::OutboundClient;
use gateway_app::config::Settings;
use gateway_app::handlers::Downstream;
use jwt_core::TokenValidator;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "gateway_app=info,info".into()),
        )
        .with_target(false)
        .init();

    let settings = Settings::from_env().context("failed to load gateway settings")?;
    let key = settings.jwt.resolve_key()?;
    let validator = Arc::new(TokenValidator::new(
        key,
        settings.jwt.require_audience.clone(),
        Some(settings.jwt.role_claim_name.clone()),
    ));

    info!(host = %settings.host, port = settings.port, "starting gateway");

    let token_header = settings.jwt.token_header.clone();
    let downstream = web::Data::new(Downstream {
        resource: OutboundClient::propagating(),
        resource_url: settings.resource_url.clone(),
        backend: OutboundClient::injecting(settings.service_token.clone()),
        backend_url: settings.backend_url.clone(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(downstream.clone())
            .wrap(
                BearerAuth::new(ProviderChain::jwt(validator.clone()))
                    .with_header_name(token_header.clone()),
            )
            .configure(gateway_app::configure)
    })
    .bind((settings.host.as_str(), settings.port))
    .context("failed to bind gateway listener")?
    .run()
    .await?;

    Ok(())
}
