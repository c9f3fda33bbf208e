use actix_web::{web, HttpResponse};
use serde::Deserialize;

use jwt_core::{codec, Claims, KeyMaterial, TokenValidator};

use crate::error::{ApiError, Result};

/// Request body for `POST /token`.
///
/// The claims are signed exactly as supplied; the service never injects an
/// expiry or any other registered claim.
#[derive(Debug, Deserialize)]
pub struct IssueRequest {
    pub algorithm: Option<String>,
    pub claims: Claims,
    pub symmetric_key: Option<String>,
    pub private_key_pem: Option<String>,
}

pub async fn issue_token(body: web::Json<IssueRequest>) -> Result<HttpResponse> {
    let body = body.into_inner();
    let key_value = key_material(&body.symmetric_key, &body.private_key_pem)?;
    let key = KeyMaterial::resolve(key_value, body.algorithm.as_deref())?;

    let token = codec::issue(&body.claims, key.algorithm(), &key)?;
    tracing::info!(algorithm = ?key.algorithm(), "issued token");
    Ok(HttpResponse::Ok().content_type("text/plain").body(token))
}

#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    #[serde(default = "default_key_algorithm")]
    pub algorithm: String,
}

fn default_key_algorithm() -> String {
    "HmacSHA256".to_string()
}

pub async fn generate_key(query: web::Query<KeyQuery>) -> Result<HttpResponse> {
    let encoded = codec::generate_symmetric_key(&query.algorithm)?;
    Ok(HttpResponse::Ok().content_type("text/plain").body(encoded))
}

/// Request body for `POST /verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
    pub symmetric_key: Option<String>,
    pub public_key_pem: Option<String>,
}

/// Verify a token against caller-supplied key material and echo its claims.
///
/// Only signature-level checks apply here: no audience, subject or role
/// requirements, since the service has no opinion on who the token is for.
pub async fn verify_token(body: web::Json<VerifyRequest>) -> Result<HttpResponse> {
    let body = body.into_inner();
    let key_value = key_material(&body.symmetric_key, &body.public_key_pem)?;
    let key = KeyMaterial::resolve(key_value, None)?;

    let validator = TokenValidator::new(key, None, None);
    let claims = validator.decode_verified(&body.token)?;
    Ok(HttpResponse::Ok().json(claims))
}

fn key_material<'a>(
    symmetric: &'a Option<String>,
    pem: &'a Option<String>,
) -> Result<&'a str> {
    match (symmetric, pem) {
        (Some(secret), None) => Ok(secret),
        (None, Some(pem)) => Ok(pem),
        _ => Err(ApiError::MissingKeyMaterial),
    }
}
