//! # Authentication middleware
//!
//! Request-side half of the token lifecycle for actix services:
//!
//! - [`BearerAuth`]: extracts the bearer credential from the configured
//!   header, runs it through the provider chain and attaches the resulting
//!   principal to the request. Failures short-circuit with a uniform 401;
//!   the specific failure kind only goes to the logs.
//! - [`RequireAuthority`]: per-route authorization gate comparing a declared
//!   authority against the principal's set; failure is a uniform 403.
//! - [`Authenticated`]: extractor handing handlers the validated principal.
//!
//! Authentication failures are terminal for their request only and are never
//! retried: a bearer token is static for the lifetime of the request.

pub mod authority;
pub mod bearer;
pub mod provider;

pub use authority::RequireAuthority;
pub use bearer::{Authenticated, BearerAuth};
pub use provider::{Credential, JwtProvider, Provider, ProviderChain};
