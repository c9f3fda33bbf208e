//! Credential propagation for gateway-to-backend HTTP calls.
//!
//! An [`OutboundClient`] carries exactly one of two strategies, chosen when
//! the client is configured:
//!
//! - **Propagation** forwards the calling request's validated bearer token
//!   verbatim; the downstream service re-validates it independently.
//! - **Injection** attaches a fixed service-level token so the call
//!   authenticates as the gateway itself rather than impersonating the
//!   caller.
//!
//! Downstream 401/403 responses are rewritten into
//! [`OutboundError::AccessDenied`] so callers cannot mistake an auth failure
//! for transport I/O. Nothing is ever retried here: a rejected token stays
//! rejected until someone supplies a fresh one.

mod client;
mod error;

pub use client::OutboundClient;
pub use error::OutboundError;
