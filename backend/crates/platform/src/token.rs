//! Signed Bearer Tokens
//!
//! Stateless, expiring HS256 JWTs:
//!
//! ```text
//! base64url({"typ":"JWT","alg":"HS256"}) . base64url(claims + iat + exp) . base64url(HMAC-SHA256)
//! ```
//!
//! Nothing is stored server-side. A token is valid if its MAC matches the
//! secret and the current time is not past `exp`. There is no revocation.
//! Encoding and signature checks are done by `jsonwebtoken`; expiry is
//! checked here so that the clock can be injected.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::random_bytes;

/// The only accepted `alg` header value
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Length of secrets produced by [`SigningSecret::random`]
pub const RANDOM_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token algorithm is not supported")]
    UnsupportedAlgorithm,

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token lifetime must be at least one second")]
    InvalidTtl,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

// ============================================================================
// Signing Secret
// ============================================================================

/// Symmetric key used to sign and verify tokens. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Fresh random secret; tokens signed with it die with the process.
    pub fn random() -> Self {
        Self(random_bytes(RANDOM_SECRET_LEN))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct OutgoingPayload<'a, C> {
    #[serde(flatten)]
    claims: &'a C,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct IncomingPayload<C> {
    #[serde(flatten)]
    claims: C,
    iat: i64,
    exp: i64,
}

/// Claims recovered from a token that passed signature and expiry checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken<C> {
    pub claims: C,
    /// Unix seconds
    pub issued_at: i64,
    /// Unix seconds
    pub expires_at: i64,
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        JwtErrorKind::InvalidSignature => TokenError::BadSignature,
        JwtErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm,
        JwtErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

// ============================================================================
// Issue / Verify
// ============================================================================

/// Sign `claims` with `secret`, valid for `ttl` from now.
///
/// `C` must serialize as a JSON object; `iat` and `exp` are added to it.
pub fn issue<C: Serialize>(
    claims: &C,
    secret: &SigningSecret,
    ttl: Duration,
) -> Result<String, TokenError> {
    issue_at(claims, secret, ttl, Utc::now())
}

/// [`issue`] with an explicit issuance time
pub fn issue_at<C: Serialize>(
    claims: &C,
    secret: &SigningSecret,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let ttl_secs = i64::try_from(ttl.as_secs()).map_err(|_| TokenError::InvalidTtl)?;
    if ttl_secs == 0 {
        return Err(TokenError::InvalidTtl);
    }

    let iat = now.timestamp();
    let exp = iat.checked_add(ttl_secs).ok_or(TokenError::InvalidTtl)?;
    let payload = OutgoingPayload { claims, iat, exp };

    jsonwebtoken::encode(
        &Header::new(TOKEN_ALGORITHM),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Check signature, then expiry, and return the embedded claims.
pub fn verify<C: DeserializeOwned>(
    token: &str,
    secret: &SigningSecret,
) -> Result<VerifiedToken<C>, TokenError> {
    verify_at(token, secret, Utc::now())
}

/// [`verify`] against an explicit current time
pub fn verify_at<C: DeserializeOwned>(
    token: &str,
    secret: &SigningSecret,
    now: DateTime<Utc>,
) -> Result<VerifiedToken<C>, TokenError> {
    // Only HS256 is listed, so `none` and every other alg are refused
    // before the MAC is checked.
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;

    let data = jsonwebtoken::decode::<IncomingPayload<C>>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(map_decode_error)?;
    let payload = data.claims;

    if now.timestamp() > payload.exp {
        return Err(TokenError::Expired);
    }

    Ok(VerifiedToken {
        claims: payload.claims,
        issued_at: payload.iat,
        expires_at: payload.exp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct TestClaims {
        id: String,
        email: String,
        role: i16,
    }

    fn claims() -> TestClaims {
        TestClaims {
            id: "42".to_string(),
            email: "a@b.com".to_string(),
            role: 2,
        }
    }

    fn secret() -> SigningSecret {
        SigningSecret::new(b"test-secret".to_vec())
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_roundtrip_before_expiry() {
        let token = issue(&claims(), &secret(), Duration::from_secs(3600)).unwrap();
        let verified: VerifiedToken<TestClaims> = verify(&token, &secret()).unwrap();

        assert_eq!(verified.claims, claims());
        assert_eq!(verified.expires_at - verified.issued_at, 3600);
    }

    #[test]
    fn test_token_layout() {
        let token = issue_at(&claims(), &secret(), Duration::from_secs(60), at(1_000)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");

        let payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        assert_eq!(payload["iat"], 1_000);
        assert_eq!(payload["exp"], 1_060);
        assert_eq!(payload["email"], "a@b.com");
    }

    #[test]
    fn test_expired_after_ttl() {
        let token = issue_at(&claims(), &secret(), Duration::from_secs(1), at(1_000)).unwrap();

        assert!(verify_at::<TestClaims>(&token, &secret(), at(1_000)).is_ok());
        assert!(verify_at::<TestClaims>(&token, &secret(), at(1_001)).is_ok());
        assert_eq!(
            verify_at::<TestClaims>(&token, &secret(), at(1_002)).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_expired_in_real_time() {
        let token = issue(&claims(), &secret(), Duration::from_secs(1)).unwrap();
        std::thread::sleep(Duration::from_millis(2_100));

        assert_eq!(
            verify::<TestClaims>(&token, &secret()).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_zero_ttl_rejected() {
        assert_eq!(
            issue(&claims(), &secret(), Duration::from_millis(500)).unwrap_err(),
            TokenError::InvalidTtl
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(&claims(), &secret(), Duration::from_secs(60)).unwrap();
        let other = SigningSecret::new(b"other-secret".to_vec());

        assert_eq!(
            verify::<TestClaims>(&token, &other).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_every_signature_bit_flip_rejected() {
        let token = issue_at(&claims(), &secret(), Duration::from_secs(60), at(1_000)).unwrap();
        let (signing_input, signature_b64) = token.rsplit_once('.').unwrap();
        let signature = URL_SAFE_NO_PAD.decode(signature_b64).unwrap();

        for byte in 0..signature.len() {
            for bit in 0..8 {
                let mut tampered = signature.clone();
                tampered[byte] ^= 1 << bit;
                let tampered_token = format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(&tampered));

                for _ in 0..2 {
                    assert_eq!(
                        verify_at::<TestClaims>(&tampered_token, &secret(), at(1_000))
                            .unwrap_err(),
                        TokenError::BadSignature
                    );
                }
            }
        }
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = issue(&claims(), &secret(), Duration::from_secs(60)).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let mut forged = claims();
        forged.role = 1;
        let forged_payload = serde_json::json!({
            "id": forged.id, "email": forged.email, "role": forged.role,
            "iat": 0, "exp": i64::MAX,
        });
        let forged_b64 = URL_SAFE_NO_PAD.encode(forged_payload.to_string().as_bytes());
        let forged_token = format!("{}.{}.{}", parts[0], forged_b64, parts[2]);

        assert_eq!(
            verify::<TestClaims>(&forged_token, &secret()).unwrap_err(),
            TokenError::BadSignature
        );
    }

    #[test]
    fn test_other_algorithms_rejected() {
        let payload = serde_json::json!({
            "id": "42", "email": "a@b.com", "role": 2, "iat": 0, "exp": 9_999_999_999i64,
        });
        let hs512 = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &payload,
            &EncodingKey::from_secret(secret().as_bytes()),
        )
        .unwrap();

        assert_eq!(
            verify::<TestClaims>(&hs512, &secret()).unwrap_err(),
            TokenError::UnsupportedAlgorithm
        );
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD
            .encode(br#"{"id":"42","email":"a@b.com","role":2,"iat":0,"exp":9999999999}"#);

        for token in [format!("{header}.{payload}."), format!("{header}.{payload}.AAAA")] {
            assert!(verify::<TestClaims>(&token, &secret()).is_err(), "token {token:?}");
        }
    }

    #[test]
    fn test_missing_exp_rejected() {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "id": "42", "email": "a@b.com", "role": 2, "iat": 0 }),
            &EncodingKey::from_secret(secret().as_bytes()),
        )
        .unwrap();

        assert_eq!(
            verify::<TestClaims>(&token, &secret()).unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["", "abc", "a.b", "a.b.c.d", "a.b.!!!"] {
            assert_eq!(
                verify::<TestClaims>(token, &secret()).unwrap_err(),
                TokenError::Malformed,
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_secret_debug_redaction() {
        let debug_output = format!("{:?}", secret());
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("test-secret"));
    }

    #[test]
    fn test_random_secret() {
        let a = SigningSecret::random();
        let b = SigningSecret::random();
        assert_eq!(a.as_bytes().len(), RANDOM_SECRET_LEN);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
