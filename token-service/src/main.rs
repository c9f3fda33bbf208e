//! Token Service Main Entry Point
//!
//! Starts the HTTP server exposing:
//! - POST /token   sign caller-supplied claims
//! - GET  /key     mint a random symmetric key
//! - POST /verify  verify a token against caller-supplied key material

use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;

use token_service::config::Settings;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "token_service=info,info".into()),
        )
        .with_target(false)
        .init();

    let settings = Settings::from_env().context("failed to load token-service settings")?;
    info!(host = %settings.host, port = settings.port, "starting token-service");

    HttpServer::new(|| App::new().configure(token_service::configure))
        .bind((settings.host.as_str(), settings.port))
        .context("failed to bind token-service listener")?
        .run()
        .await?;

    Ok(())
}
