use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};

use jwt_core::AuthenticatedPrincipal;

use crate::error::OutboundError;

/// Which credential an [`OutboundClient`] attaches.
///
/// The injected header is formatted and parsed once at construction;
/// propagation builds the header per call from the principal threaded in by
/// the caller. There is deliberately no ambient "current principal" to read
/// from.
enum Strategy {
    Propagate,
    Inject(HeaderValue),
}

/// HTTP client wrapper that authenticates every outbound call.
pub struct OutboundClient {
    http: Client,
    strategy: Strategy,
}

impl OutboundClient {
    /// A client that forwards the caller's own bearer token.
    pub fn propagating() -> Self {
        Self {
            http: Client::new(),
            strategy: Strategy::Propagate,
        }
    }

    /// A client that always authenticates with `service_token`, set once at
    /// startup.
    pub fn injecting(service_token: impl Into<String>) -> Self {
        let header = HeaderValue::try_from(format!("Bearer {}", service_token.into()))
            // Construction-time failure is a configuration error; valid
            // tokens are ASCII by definition.
            .expect("service token contains invalid header characters");
        Self {
            http: Client::new(),
            strategy: Strategy::Inject(header),
        }
    }

    /// The `Authorization` value this client would attach for `principal`.
    pub fn authorization_header(
        &self,
        principal: Option<&AuthenticatedPrincipal>,
    ) -> Result<HeaderValue, OutboundError> {
        match &self.strategy {
            Strategy::Inject(header) => Ok(header.clone()),
            Strategy::Propagate => {
                let principal = principal.ok_or(OutboundError::NoActivePrincipal)?;
                Ok(
                    HeaderValue::try_from(format!("Bearer {}", principal.raw_token()))
                        // The raw token was read out of a request header, so
                        // it is already valid ASCII.
                        .expect("validated token contains invalid header characters"),
                )
            }
        }
    }

    pub async fn get(
        &self,
        url: &str,
        principal: Option<&AuthenticatedPrincipal>,
    ) -> Result<Response, OutboundError> {
        let header = self.authorization_header(principal)?;
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, header)
            .send()
            .await?;
        check_status(response.status())?;
        Ok(response)
    }

    pub async fn post(
        &self,
        url: &str,
        principal: Option<&AuthenticatedPrincipal>,
    ) -> Result<Response, OutboundError> {
        let header = self.authorization_header(principal)?;
        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, header)
            .send()
            .await?;
        check_status(response.status())?;
        Ok(response)
    }
}

/// Rewrite downstream auth rejections into a distinguished error category.
fn check_status(status: StatusCode) -> Result<(), OutboundError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::warn!(%status, "downstream call was denied");
        return Err(OutboundError::AccessDenied { status });
    }
    Ok(())
}
