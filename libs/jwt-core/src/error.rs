use thiserror::Error;

/// Everything that can go wrong between "bytes arrived" and "principal
/// attached".
///
/// Each validation step maps to exactly one kind so the pipeline can log the
/// precise failure while answering the client with a uniform 401/403. The
/// outbound-call kinds (`NoActivePrincipal`, `AccessDenied`) live in
/// `credential-propagation` because they only arise there.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no bearer token in request")]
    MissingToken,

    #[error("token is structurally malformed")]
    MalformedToken,

    #[error("token is not digitally signed")]
    UnsignedToken,

    #[error("token signature verification failed")]
    BadSignature,

    #[error("token has expired")]
    ExpiredToken,

    #[error("token audience does not match the required audience")]
    AudienceMismatch,

    #[error("token has no subject claim")]
    MissingSubject,

    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("key material is incompatible with the requested algorithm")]
    KeyTypeMismatch,

    #[error("failed to parse key material: {0}")]
    KeyParseError(String),

    #[error("principal lacks the required authority")]
    InsufficientAuthority,
}
