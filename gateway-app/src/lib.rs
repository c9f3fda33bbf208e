//! User-facing gateway.
//!
//! Every route sits behind bearer authentication; `/bye` additionally
//! requires the `ADMIN` authority. The `/resource` routes relay to the
//! resource service with the caller's own token, the `/backend` routes call
//! the backend service with the gateway's service token.

use actix_web::web;
use auth_middleware::RequireAuthority;

pub mod config;
pub mod error;
pub mod handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::welcome))
        .service(
            web::resource("/bye")
                .wrap(RequireAuthority::new("ADMIN"))
                .route(web::get().to(handlers::admin)),
        )
        .service(
            web::resource("/resource")
                .route(web::get().to(handlers::read_resource))
                .route(web::post().to(handlers::write_resource)),
        )
        .service(
            web::resource("/backend")
                .route(web::get().to(handlers::read_backend))
                .route(web::post().to(handlers::write_backend)),
        );
}
