//! Backend service.
//!
//! Called by the gateway under its service-level token, never with an
//! end-user credential. Reads need `backend.read`, writes need
//! `backend.write`; the responses are deliberately empty, the gates are the
//! contract.

use actix_web::{guard, web, HttpResponse};
use auth_middleware::RequireAuthority;

pub mod config;

pub async fn read() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn write() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .guard(guard::Get())
            .wrap(RequireAuthority::new("backend.read"))
            .route(web::route().to(read)),
    )
    .service(
        web::resource("/")
            .guard(guard::Any(guard::Post()).or(guard::Put()))
            .wrap(RequireAuthority::new("backend.write"))
            .route(web::route().to(write)),
    );
}
