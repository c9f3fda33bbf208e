//! Token issuance.
//!
//! The codec signs a caller-supplied claim map into a compact
//! `header.claims.signature` token. Claims go onto the wire verbatim: no
//! expiry or not-before is injected, so a token without `exp` never expires.
//! Whether to mandate expiry is the token operator's call, not the codec's.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{encode, errors::ErrorKind, Algorithm, Header};
use rand::RngCore;

use crate::error::AuthError;
use crate::key::KeyMaterial;
use crate::Claims;

/// Sign `claims` with `algorithm` using `key`.
///
/// The algorithm family must match the key variant: HMAC with a symmetric
/// secret, RSA with an asymmetric key that has its private half.
pub fn issue(claims: &Claims, algorithm: Algorithm, key: &KeyMaterial) -> Result<String, AuthError> {
    if !key.supports(algorithm) {
        return Err(AuthError::KeyTypeMismatch);
    }

    let encoding_key = key.encoding_key()?;
    encode(&Header::new(algorithm), claims, &encoding_key).map_err(|e| match e.kind() {
        ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidKeyFormat => AuthError::KeyTypeMismatch,
        _ => AuthError::KeyParseError(e.to_string()),
    })
}

/// Generate fresh random key material for the named algorithm, encoded
/// base64url without padding. Used by operators to bootstrap a shared
/// secret.
pub fn generate_symmetric_key(algorithm_name: &str) -> Result<String, AuthError> {
    let len = key_length(algorithm_name)
        .ok_or_else(|| AuthError::UnsupportedAlgorithm(algorithm_name.to_string()))?;

    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

// Key sizes match the JCA defaults for each algorithm name.
fn key_length(algorithm_name: &str) -> Option<usize> {
    match algorithm_name {
        "HmacSHA256" | "HS256" => Some(32),
        "HmacSHA384" | "HS384" => Some(48),
        "HmacSHA512" | "HS512" => Some(64),
        "AES" => Some(16),
        _ => None,
    }
}
