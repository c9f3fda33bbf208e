use reqwest::StatusCode;
use thiserror::Error;

/// Failures of an outbound, credentialed HTTP call.
#[derive(Debug, Error)]
pub enum OutboundError {
    /// A propagating client was used outside an authenticated request.
    #[error("no authenticated principal available to propagate")]
    NoActivePrincipal,

    /// The downstream service rejected the credential (401 or 403).
    #[error("downstream rejected the call with status {status}")]
    AccessDenied { status: StatusCode },

    /// Plain transport failure; the credential was never judged.
    #[error("downstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
