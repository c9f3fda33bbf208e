//! Development token service.
//!
//! Issues signed JWTs from caller-supplied claims and key material, mints
//! random symmetric keys and verifies tokens on demand. Nothing here holds a
//! long-lived signing key: every request brings its own, which is what makes
//! the service safe to run as a shared dev fixture.

use actix_web::web;

pub mod config;
pub mod error;
pub mod handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/token", web::post().to(handlers::issue_token))
        .route("/key", web::get().to(handlers::generate_key))
        .route("/verify", web::post().to(handlers::verify_token));
}
