//! Per-route authorization gate.
//!
//! The required authority is declared where the route is registered and
//! never changes afterwards; the check itself runs on every call against
//! the principal attached by [`BearerAuth`](crate::BearerAuth).

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorForbidden, ErrorUnauthorized},
    Error, HttpMessage,
};
use futures::future::{ready, Ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use jwt_core::{AuthError, AuthenticatedPrincipal};

/// Route middleware rejecting principals that hold none of the declared
/// authorities.
pub struct RequireAuthority {
    required: Arc<Vec<String>>,
}

impl RequireAuthority {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            required: Arc::new(vec![authority.into()]),
        }
    }

    /// Accept a principal holding any one of `authorities`.
    pub fn any_of(authorities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            required: Arc::new(authorities.into_iter().map(Into::into).collect()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuthority
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequireAuthorityService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthorityService {
            service: Rc::new(service),
            required: Arc::clone(&self.required),
        }))
    }
}

pub struct RequireAuthorityService<S> {
    service: Rc<S>,
    required: Arc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthorityService<S>
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
        let required = Arc::clone(&self.required);

        Box::pin(async move {
            let granted = {
                let extensions = req.extensions();
                match extensions.get::<AuthenticatedPrincipal>() {
                    Some(principal) => required
                        .iter()
                        .any(|authority| principal.has_authority(authority)),
                    None => {
                        drop(extensions);
                        tracing::warn!(path = %req.path(), "authorization check without a principal");
                        return Err(ErrorUnauthorized("Unauthorized"));
                    }
                }
            };

            if !granted {
                tracing::warn!(
                    error = %AuthError::InsufficientAuthority,
                    required = ?required,
                    path = %req.path(),
                    "rejecting request"
                );
                return Err(ErrorForbidden("Forbidden"));
            }

            service.call(req).await
        })
    }
}
