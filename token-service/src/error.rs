use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use jwt_core::AuthError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures surfaced to token-service callers.
///
/// Key-material problems are the caller's fault (400); a token that fails
/// verification answers 401 like any other rejected credential.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request did not supply usable key material")]
    MissingKeyMaterial,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingKeyMaterial => StatusCode::BAD_REQUEST,
            ApiError::Auth(err) => match err {
                AuthError::UnsupportedAlgorithm(_)
                | AuthError::KeyTypeMismatch
                | AuthError::KeyParseError(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::UNAUTHORIZED,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::warn!(error = %self, "token-service request rejected");
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
        }))
    }
}
