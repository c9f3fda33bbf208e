//! Shared JWT primitives for the gateway and resource services.
//!
//! This crate owns the three token-lifecycle pieces every service shares:
//!
//! - **Key resolution**: a configuration string becomes [`KeyMaterial`]
//!   (symmetric HMAC secret or RSA PEM key pair) exactly once at startup.
//! - **Issuance**: [`codec::issue`] signs a caller-supplied claim map into a
//!   compact token. Claims are used verbatim; the codec injects nothing.
//! - **Validation**: [`TokenValidator`] verifies a bearer token and produces
//!   an [`AuthenticatedPrincipal`] carrying the subject, the raw token and
//!   the parsed authority set.
//!
//! A principal can only be minted by the validator. Everything in this crate
//! is immutable after construction and safe to share across request tasks.

use std::collections::HashSet;

pub mod codec;
pub mod error;
pub mod key;
pub mod settings;
pub mod testing;
pub mod validator;

pub use error::AuthError;
pub use key::KeyMaterial;
pub use settings::JwtSettings;
pub use validator::TokenValidator;

/// Token payload: an order-irrelevant map of claim name to JSON value.
///
/// Callers supply these on issuance; validation requires a non-empty `sub`
/// and optionally checks `aud` and a configurable role claim.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Identity derived from a successfully validated token.
///
/// Owned by the request that presented the token and dropped with it. The
/// raw token is kept so a gateway can forward the exact credential
/// downstream without re-signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    subject: String,
    raw_token: String,
    authorities: HashSet<String>,
}

impl AuthenticatedPrincipal {
    // Construction is reserved for the validator so a principal always
    // represents a verified token, never untrusted input.
    pub(crate) fn new(subject: String, raw_token: String, authorities: HashSet<String>) -> Self {
        Self {
            subject,
            raw_token,
            authorities,
        }
    }

    /// The `sub` claim of the validated token.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The exact bearer string that produced this principal.
    pub fn raw_token(&self) -> &str {
        &self.raw_token
    }

    /// Authorities parsed from the role claim; empty if the claim was absent.
    pub fn authorities(&self) -> &HashSet<String> {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }
}
