use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use credential_propagation::OutboundError;
use serde_json::json;
use thiserror::Error;

/// Failures of a gateway call into a downstream service.
///
/// A downstream 401/403 is reported as 403 here: from the caller's point of
/// view the gateway accepted their credential, the downstream did not.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("downstream denied the call with status {status}")]
    AccessDenied { status: u16 },

    #[error("no authenticated caller to act for")]
    NoPrincipal,

    #[error("downstream call failed")]
    Upstream(#[from] reqwest::Error),
}

impl From<OutboundError> for GatewayError {
    fn from(err: OutboundError) -> Self {
        match err {
            OutboundError::AccessDenied { status } => GatewayError::AccessDenied {
                status: status.as_u16(),
            },
            OutboundError::NoActivePrincipal => GatewayError::NoPrincipal,
            OutboundError::Transport(err) => GatewayError::Upstream(err),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            GatewayError::NoPrincipal => StatusCode::UNAUTHORIZED,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::warn!(error = %self, "downstream call failed");
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
        }))
    }
}
