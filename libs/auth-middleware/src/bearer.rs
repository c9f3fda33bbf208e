//! Bearer-token authentication filter.
//!
//! Wraps the whole app: every request must carry the configured header with
//! a `Bearer ` prefix, and the credential must validate through the provider
//! chain before the original handler runs. On success the request proceeds
//! exactly as if the resource were not secured at all.

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use jwt_core::{AuthError, AuthenticatedPrincipal};

use crate::provider::{Credential, ProviderChain};

const BEARER_PREFIX: &str = "Bearer ";
const DEFAULT_TOKEN_HEADER: &str = "Authorization";

/// Authentication middleware: token extraction + provider dispatch.
pub struct BearerAuth {
    chain: Arc<ProviderChain>,
    header_name: String,
}

impl BearerAuth {
    pub fn new(chain: ProviderChain) -> Self {
        Self {
            chain: Arc::new(chain),
            header_name: DEFAULT_TOKEN_HEADER.to_string(),
        }
    }

    /// Read the token from a different header than `Authorization`.
    pub fn with_header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = BearerAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthService {
            service: Rc::new(service),
            chain: Arc::clone(&self.chain),
            header_name: self.header_name.clone(),
        }))
    }
}

pub struct BearerAuthService<S> {
    service: Rc<S>,
    chain: Arc<ProviderChain>,
    header_name: String,
}

impl<S, B> Service<ServiceRequest> for BearerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let chain = Arc::clone(&self.chain);
        let header_name = self.header_name.clone();

        Box::pin(async move {
            let credential = match extract_credential(&req, &header_name) {
                Ok(credential) => credential,
                Err(e) => {
                    tracing::warn!(error = %e, path = %req.path(), "rejecting unauthenticated request");
                    // Uniform body: the failure kind stays in the logs.
                    return Err(ErrorUnauthorized("Unauthorized"));
                }
            };

            let principal = match chain.authenticate(&credential) {
                Ok(principal) => principal,
                Err(e) => {
                    tracing::warn!(error = %e, path = %req.path(), "token validation failed");
                    return Err(ErrorUnauthorized("Unauthorized"));
                }
            };

            req.extensions_mut().insert(principal);
            service.call(req).await
        })
    }
}

fn extract_credential(req: &ServiceRequest, header_name: &str) -> Result<Credential, AuthError> {
    // Assumes a single instance of the token header.
    let header = req
        .headers()
        .get(header_name)
        .ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| AuthError::MalformedToken)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedToken)?;
    if token.is_empty() {
        return Err(AuthError::MalformedToken);
    }
    Ok(Credential::Bearer(token.to_string()))
}

/// Extractor for the principal attached by [`BearerAuth`].
///
/// Yields 401 when no principal is present, which only happens for routes
/// mounted outside the middleware.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthenticatedPrincipal);

impl Authenticated {
    pub fn into_inner(self) -> AuthenticatedPrincipal {
        self.0
    }
}

impl Deref for Authenticated {
    type Target = AuthenticatedPrincipal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedPrincipal>() {
            Some(principal) => ready(Ok(Authenticated(principal.clone()))),
            None => ready(Err(ErrorUnauthorized("Unauthorized"))),
        }
    }
}
