//! Resource service.
//!
//! One resource, two authority gates: reads need `resource.read`, writes
//! (POST or PUT) need `resource.write`. The caller's token is whatever the
//! gateway propagated; this service validates it independently.

use actix_web::{guard, web};
use auth_middleware::RequireAuthority;

pub mod config;
pub mod handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Resource-level guards split the methods before the authority gates
    // run, so a write never hits the read gate.
    cfg.service(
        web::resource("/")
            .guard(guard::Get())
            .wrap(RequireAuthority::new("resource.read"))
            .route(web::route().to(handlers::read)),
    )
    .service(
        web::resource("/")
            .guard(guard::Any(guard::Post()).or(guard::Put()))
            .wrap(RequireAuthority::new("resource.write"))
            .route(web::route().to(handlers::write)),
    );
}
