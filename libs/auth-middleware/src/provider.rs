//! Credential dispatch.
//!
//! Credentials are a closed tagged variant rather than an open trait: adding
//! a credential kind means adding a variant here and a provider that matches
//! it, with the dispatch visible in one `match`.

use std::sync::Arc;

use jwt_core::{AuthError, AuthenticatedPrincipal, TokenValidator};

/// A credential as extracted from the request, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// The token portion of an `Authorization: Bearer <token>` header.
    Bearer(String),
}

/// Validates JWT bearer credentials against a shared [`TokenValidator`].
#[derive(Clone)]
pub struct JwtProvider {
    validator: Arc<TokenValidator>,
}

impl JwtProvider {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }

    fn authenticate(&self, token: &str) -> Result<AuthenticatedPrincipal, AuthError> {
        self.validator.validate(token)
    }
}

/// The enumerated set of supported provider kinds.
#[derive(Clone)]
pub enum Provider {
    Jwt(JwtProvider),
}

impl Provider {
    pub fn supports(&self, credential: &Credential) -> bool {
        match (self, credential) {
            (Provider::Jwt(_), Credential::Bearer(_)) => true,
        }
    }

    pub fn authenticate(
        &self,
        credential: &Credential,
    ) -> Result<AuthenticatedPrincipal, AuthError> {
        match (self, credential) {
            (Provider::Jwt(provider), Credential::Bearer(token)) => provider.authenticate(token),
        }
    }
}

/// Ordered providers; the first one that supports the credential kind
/// decides the outcome.
#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Provider>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Provider>) -> Self {
        Self { providers }
    }

    /// A chain with a single JWT provider, the common configuration.
    pub fn jwt(validator: Arc<TokenValidator>) -> Self {
        Self::new(vec![Provider::Jwt(JwtProvider::new(validator))])
    }

    pub fn authenticate(
        &self,
        credential: &Credential,
    ) -> Result<AuthenticatedPrincipal, AuthError> {
        for provider in &self.providers {
            if provider.supports(credential) {
                return provider.authenticate(credential);
            }
        }
        tracing::warn!("no authentication provider supports the presented credential");
        Err(AuthError::MalformedToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwt_core::testing::{claims, hs256_token};
    use jwt_core::KeyMaterial;

    fn chain(secret: &str) -> ProviderChain {
        let key = KeyMaterial::resolve(secret, None).unwrap();
        ProviderChain::jwt(Arc::new(TokenValidator::new(key, None, None)))
    }

    #[test]
    fn bearer_credential_dispatches_to_jwt_provider() {
        let token = hs256_token(&claims(&[("sub", "alice")]), "s3cr3t");
        let principal = chain("s3cr3t")
            .authenticate(&Credential::Bearer(token))
            .unwrap();
        assert_eq!(principal.subject(), "alice");
    }

    #[test]
    fn provider_failure_propagates_unchanged() {
        let err = chain("s3cr3t")
            .authenticate(&Credential::Bearer("junk".to_string()))
            .unwrap_err();
        assert_eq!(err, AuthError::MalformedToken);
    }

    #[test]
    fn empty_chain_rejects_every_credential() {
        let err = ProviderChain::new(Vec::new())
            .authenticate(&Credential::Bearer("anything".to_string()))
            .unwrap_err();
        assert_eq!(err, AuthError::MalformedToken);
    }
}
