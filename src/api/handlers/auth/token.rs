//! Session token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the principal's identity plus issued-at and
//! expiry claims. The signature is checked before any decoded claim is
//! trusted; a token that merely looks well-formed but fails the signature
//! check is rejected the same way outright garbage is.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;
use uuid::Uuid;

/// Claims encoded in a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct Claims {
    pub(super) sub: String,
    pub(super) username: String,
    pub(super) iat: i64,
    pub(super) exp: i64,
    pub(super) iss: String,
    pub(super) jti: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(super) enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

/// Issues and verifies session tokens with a process-wide secret.
///
/// Keys are derived once at startup; the secret itself never appears in a
/// token and is not rotated mid-process.
pub(super) struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_seconds: i64,
}

impl TokenSigner {
    pub(super) fn new(secret: &SecretString, issuer: String, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            issuer,
            ttl_seconds,
        }
    }

    /// Issue a token for the principal, valid for the configured duration.
    ///
    /// # Errors
    /// Returns an error if the claims cannot be signed.
    pub(super) fn issue(&self, user_id: Uuid, username: &str) -> anyhow::Result<String> {
        let now = now_unix_seconds();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| anyhow::anyhow!("failed to sign session token: {err}"))
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// # Errors
    /// `Expired` for stale tokens, `InvalidSignature` for tampered ones, and
    /// `Malformed` for everything that does not even parse.
    pub(super) fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        // Expiry is exact, no leeway.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}

/// Unix seconds for token timestamps.
fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|duration| i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
