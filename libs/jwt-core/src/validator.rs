//! Token validation.
//!
//! Checks run cheapest and most security-critical first: structure, then the
//! `alg: none` downgrade gate, then signature and expiry, then audience,
//! subject and roles. Every failure maps to a single [`AuthError`] kind; the
//! HTTP layer answers with a uniform 401 and keeps the kind for its logs.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, Validation};
use serde_json::Value;
use std::collections::HashSet;

use crate::error::AuthError;
use crate::key::{parse_algorithm, KeyMaterial};
use crate::{AuthenticatedPrincipal, Claims};

/// Claim holding the comma-separated authority list, unless configured
/// otherwise.
pub const DEFAULT_ROLE_CLAIM: &str = "roles";

/// Immutable, reentrant token verifier.
///
/// Carries no per-call state, so a single instance is shared by every
/// request task.
pub struct TokenValidator {
    key: KeyMaterial,
    required_audience: Option<String>,
    role_claim: String,
}

impl TokenValidator {
    pub fn new(
        key: KeyMaterial,
        required_audience: Option<String>,
        role_claim: Option<String>,
    ) -> Self {
        Self {
            key,
            required_audience,
            role_claim: role_claim.unwrap_or_else(|| DEFAULT_ROLE_CLAIM.to_string()),
        }
    }

    /// Fully validate `token` and derive the caller's identity.
    ///
    /// On top of [`decode_verified`](Self::decode_verified) this enforces the
    /// configured audience, requires a non-empty subject and parses the role
    /// claim into the authority set.
    pub fn validate(&self, token: &str) -> Result<AuthenticatedPrincipal, AuthError> {
        let claims = self.decode_verified(token)?;

        if let Some(required) = &self.required_audience {
            if !audience_contains(claims.get("aud"), required) {
                return Err(AuthError::AudienceMismatch);
            }
        }

        let subject = match claims.get("sub") {
            Some(Value::String(sub)) if !sub.is_empty() => sub.clone(),
            _ => return Err(AuthError::MissingSubject),
        };

        let authorities = parse_authorities(claims.get(&self.role_claim));

        Ok(AuthenticatedPrincipal::new(
            subject,
            token.to_string(),
            authorities,
        ))
    }

    /// Verify structure, signature and expiry and return the raw claim map.
    ///
    /// This is the verification-endpoint path: no audience, subject or role
    /// handling. An `exp` claim is enforced when present and ignored when
    /// absent, matching the issuance side which never injects one.
    pub fn decode_verified(&self, token: &str) -> Result<Claims, AuthError> {
        let algorithm = declared_algorithm(token)?;

        // A token signed for the other key family can never verify; refuse
        // before touching signature math.
        if !self.key.supports(algorithm) {
            return Err(AuthError::BadSignature);
        }

        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let decoding_key = self.key.decoding_key()?;
        let data = decode::<Claims>(token, &decoding_key, &validation).map_err(map_decode_error)?;
        Ok(data.claims)
    }
}

/// Parse the header segment and gate on its declared algorithm.
///
/// An absent, empty or `none` algorithm means the token is unsigned; that is
/// the classic downgrade attack and is rejected before any key is consulted.
fn declared_algorithm(token: &str) -> Result<Algorithm, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::MalformedToken);
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(parts[0])
        .map_err(|_| AuthError::MalformedToken)?;
    let header: Value =
        serde_json::from_slice(&header_bytes).map_err(|_| AuthError::MalformedToken)?;

    match header.get("alg") {
        None | Some(Value::Null) => Err(AuthError::UnsignedToken),
        Some(Value::String(alg)) if alg.is_empty() || alg.eq_ignore_ascii_case("none") => {
            Err(AuthError::UnsignedToken)
        }
        Some(Value::String(alg)) => parse_algorithm(alg),
        Some(_) => Err(AuthError::MalformedToken),
    }
}

fn audience_contains(aud: Option<&Value>, required: &str) -> bool {
    match aud {
        Some(Value::String(aud)) => aud == required,
        Some(Value::Array(entries)) => entries
            .iter()
            .any(|entry| entry.as_str() == Some(required)),
        _ => false,
    }
}

fn parse_authorities(claim: Option<&Value>) -> HashSet<String> {
    match claim {
        Some(Value::String(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(str::to_string)
            .collect(),
        _ => HashSet::new(),
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        // Key/algorithm family disagreement surfaces from the decoder as an
        // algorithm or key error; to the caller it is all the same failure
        // to verify.
        ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::InvalidKeyFormat
        | ErrorKind::InvalidRsaKey(_)
        | ErrorKind::InvalidEcdsaKey => AuthError::BadSignature,
        _ => AuthError::MalformedToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::issue;
    use crate::testing::{claims, hs256_token, TEST_PRIVATE_KEY, TEST_PUBLIC_KEY};

    fn hs_validator(secret: &str, audience: Option<&str>) -> TokenValidator {
        TokenValidator::new(
            KeyMaterial::resolve(secret, None).unwrap(),
            audience.map(str::to_string),
            None,
        )
    }

    fn segment(value: &serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn round_trip_yields_subject_and_authorities() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(
            &claims(&[("sub", "alice"), ("roles", "resource.read, resource.write")]),
            "s3cr3t",
        );

        let principal = validator.validate(&token).unwrap();
        assert_eq!(principal.subject(), "alice");
        assert_eq!(principal.raw_token(), token);
        assert_eq!(principal.authorities().len(), 2);
        assert!(principal.has_authority("resource.read"));
        assert!(principal.has_authority("resource.write"));
    }

    #[test]
    fn role_claim_absent_means_no_authorities() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(&claims(&[("sub", "alice")]), "s3cr3t");

        let principal = validator.validate(&token).unwrap();
        assert!(principal.authorities().is_empty());
    }

    #[test]
    fn role_claim_trims_whitespace_and_drops_empty_segments() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(&claims(&[("sub", "alice"), ("roles", " a ,, b , ")]), "s3cr3t");

        let principal = validator.validate(&token).unwrap();
        let expected: HashSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(principal.authorities(), &expected);
    }

    #[test]
    fn alg_none_is_unsigned_even_with_a_signature_segment() {
        let header = serde_json::json!({"alg": "none"});
        let body = serde_json::json!({"sub": "alice"});
        let token = format!("{}.{}.{}", segment(&header), segment(&body), "c2lnbmF0dXJl");

        let validator = hs_validator("s3cr3t", None);
        assert_eq!(validator.validate(&token).unwrap_err(), AuthError::UnsignedToken);
    }

    #[test]
    fn missing_alg_header_is_unsigned() {
        let header = serde_json::json!({"typ": "JWT"});
        let body = serde_json::json!({"sub": "alice"});
        let token = format!("{}.{}.{}", segment(&header), segment(&body), "c2ln");

        let validator = hs_validator("s3cr3t", None);
        assert_eq!(validator.validate(&token).unwrap_err(), AuthError::UnsignedToken);
    }

    #[test]
    fn unknown_alg_name_is_unsupported() {
        let header = serde_json::json!({"alg": "HS9000"});
        let body = serde_json::json!({"sub": "alice"});
        let token = format!("{}.{}.{}", segment(&header), segment(&body), "c2ln");

        let validator = hs_validator("s3cr3t", None);
        assert_eq!(
            validator.validate(&token).unwrap_err(),
            AuthError::UnsupportedAlgorithm("HS9000".to_string())
        );
    }

    #[test]
    fn wrong_segment_count_is_malformed() {
        let validator = hs_validator("s3cr3t", None);
        assert_eq!(
            validator.validate("only.two").unwrap_err(),
            AuthError::MalformedToken
        );
        assert_eq!(
            validator.validate("notatoken").unwrap_err(),
            AuthError::MalformedToken
        );
    }

    #[test]
    fn corrupted_signature_fails_verification() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(&claims(&[("sub", "alice")]), "s3cr3t");

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{head}.{}", chars.into_iter().collect::<String>());

        assert_eq!(
            validator.validate(&tampered).unwrap_err(),
            AuthError::BadSignature
        );
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(&claims(&[("sub", "alice")]), "other-secret");
        assert_eq!(validator.validate(&token).unwrap_err(), AuthError::BadSignature);
    }

    #[test]
    fn hmac_token_against_rsa_key_fails_before_signature_math() {
        let validator = TokenValidator::new(
            KeyMaterial::resolve(TEST_PUBLIC_KEY, None).unwrap(),
            None,
            None,
        );
        let token = hs256_token(&claims(&[("sub", "alice")]), "s3cr3t");
        assert_eq!(validator.validate(&token).unwrap_err(), AuthError::BadSignature);
    }

    #[test]
    fn missing_subject_fails_even_when_signed() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(&claims(&[("aud", "svcA")]), "s3cr3t");
        assert_eq!(validator.validate(&token).unwrap_err(), AuthError::MissingSubject);
    }

    #[test]
    fn empty_subject_counts_as_missing() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(&claims(&[("sub", "")]), "s3cr3t");
        assert_eq!(validator.validate(&token).unwrap_err(), AuthError::MissingSubject);
    }

    #[test]
    fn audience_requirement_rejects_other_audiences() {
        let token = hs256_token(&claims(&[("sub", "alice"), ("aud", "svcA")]), "s3cr3t");

        assert_eq!(
            hs_validator("s3cr3t", Some("svcB"))
                .validate(&token)
                .unwrap_err(),
            AuthError::AudienceMismatch
        );
        assert!(hs_validator("s3cr3t", Some("svcA")).validate(&token).is_ok());
        assert!(hs_validator("s3cr3t", None).validate(&token).is_ok());
    }

    #[test]
    fn audience_array_matches_by_containment() {
        let mut body = claims(&[("sub", "alice")]);
        body.insert("aud".into(), serde_json::json!(["svcA", "svcB"]));
        let token = hs256_token(&body, "s3cr3t");

        assert!(hs_validator("s3cr3t", Some("svcB")).validate(&token).is_ok());
        assert_eq!(
            hs_validator("s3cr3t", Some("svcC"))
                .validate(&token)
                .unwrap_err(),
            AuthError::AudienceMismatch
        );
    }

    #[test]
    fn absent_audience_fails_when_one_is_required() {
        let token = hs256_token(&claims(&[("sub", "alice")]), "s3cr3t");
        assert_eq!(
            hs_validator("s3cr3t", Some("svcA"))
                .validate(&token)
                .unwrap_err(),
            AuthError::AudienceMismatch
        );
    }

    #[test]
    fn elapsed_expiry_is_rejected() {
        let mut body = claims(&[("sub", "alice")]);
        body.insert(
            "exp".into(),
            serde_json::json!(chrono::Utc::now().timestamp() - 3600),
        );
        let token = hs256_token(&body, "s3cr3t");

        assert_eq!(
            hs_validator("s3cr3t", None).validate(&token).unwrap_err(),
            AuthError::ExpiredToken
        );
    }

    #[test]
    fn future_expiry_is_accepted() {
        let mut body = claims(&[("sub", "alice")]);
        body.insert(
            "exp".into(),
            serde_json::json!(chrono::Utc::now().timestamp() + 3600),
        );
        let token = hs256_token(&body, "s3cr3t");
        assert!(hs_validator("s3cr3t", None).validate(&token).is_ok());
    }

    #[test]
    fn token_without_expiry_is_accepted() {
        // The issuance side never injects exp, so this is the common case.
        let token = hs256_token(&claims(&[("sub", "alice")]), "s3cr3t");
        assert!(hs_validator("s3cr3t", None).validate(&token).is_ok());
    }

    #[test]
    fn decode_verified_does_not_require_a_subject() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(&claims(&[("custom", "value")]), "s3cr3t");

        let decoded = validator.decode_verified(&token).unwrap();
        assert_eq!(decoded.get("custom").and_then(|v| v.as_str()), Some("value"));
    }

    #[test]
    fn rs256_round_trip_across_key_halves() {
        let signing = KeyMaterial::resolve(TEST_PRIVATE_KEY, None).unwrap();
        let token = issue(
            &claims(&[("sub", "alice"), ("roles", "resource.read")]),
            Algorithm::RS256,
            &signing,
        )
        .unwrap();

        let validator = TokenValidator::new(
            KeyMaterial::resolve(TEST_PUBLIC_KEY, None).unwrap(),
            None,
            None,
        );
        let principal = validator.validate(&token).unwrap();
        assert_eq!(principal.subject(), "alice");
        assert!(principal.has_authority("resource.read"));
    }

    #[test]
    fn custom_role_claim_name_is_honoured() {
        let validator = TokenValidator::new(
            KeyMaterial::resolve("s3cr3t", None).unwrap(),
            None,
            Some("scope".to_string()),
        );
        let token = hs256_token(&claims(&[("sub", "alice"), ("scope", "x,y")]), "s3cr3t");

        let principal = validator.validate(&token).unwrap();
        assert!(principal.has_authority("x"));
        assert!(principal.has_authority("y"));
        // The default claim name is ignored once overridden.
        let other = hs256_token(&claims(&[("sub", "alice"), ("roles", "z")]), "s3cr3t");
        assert!(validator.validate(&other).unwrap().authorities().is_empty());
    }

    #[test]
    fn shared_validator_is_safe_across_threads() {
        let validator = hs_validator("s3cr3t", None);
        let token = hs256_token(&claims(&[("sub", "alice")]), "s3cr3t");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        assert!(validator.validate(&token).is_ok());
                    }
                });
            }
        });
    }
}
