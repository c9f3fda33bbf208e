use actix_web::{web, HttpResponse};

use auth_middleware::Authenticated;
use credential_propagation::OutboundClient;

use crate::error::GatewayError;

/// Downstream services reachable from the gateway, with the client configured
/// for each: the resource service sees the caller's own token, the backend
/// service only ever sees the gateway's service token.
pub struct Downstream {
    pub resource: OutboundClient,
    pub resource_url: String,
    pub backend: OutboundClient,
    pub backend_url: String,
}

pub async fn welcome(user: Authenticated) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(format!("hello {}", user.subject()))
}

/// Admin-only probe; the authority gate is the whole point, the body is empty.
pub async fn admin() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn read_resource(
    user: Authenticated,
    downstream: web::Data<Downstream>,
) -> Result<HttpResponse, GatewayError> {
    let response = downstream
        .resource
        .get(&downstream.resource_url, Some(&user))
        .await?;
    let body = response.text().await?;
    Ok(HttpResponse::Ok().content_type("text/plain").body(body))
}

pub async fn write_resource(
    user: Authenticated,
    downstream: web::Data<Downstream>,
) -> Result<HttpResponse, GatewayError> {
    let response = downstream
        .resource
        .post(&downstream.resource_url, Some(&user))
        .await?;
    let body = response.text().await?;
    Ok(HttpResponse::Ok().content_type("text/plain").body(body))
}

/// Calls the backend as the gateway itself; the caller still has to be
/// authenticated to reach this route, but their token goes no further.
pub async fn read_backend(
    _user: Authenticated,
    downstream: web::Data<Downstream>,
) -> Result<HttpResponse, GatewayError> {
    downstream.backend.get(&downstream.backend_url, None).await?;
    Ok(HttpResponse::Ok().finish())
}

pub async fn write_backend(
    _user: Authenticated,
    downstream: web::Data<Downstream>,
) -> Result<HttpResponse, GatewayError> {
    downstream
        .backend
        .post(&downstream.backend_url, None)
        .await?;
    Ok(HttpResponse::Ok().finish())
}
