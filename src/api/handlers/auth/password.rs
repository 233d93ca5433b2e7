//! Password hashing with per-credential random salt.
//!
//! Digests are argon2 PHC strings, so the salt and parameters travel with the
//! digest and verification needs no side table. Hashing is deliberately slow;
//! callers run it on the blocking pool.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use tracing::warn;

// Verified when sign-in hits an unknown username, so both failure paths pay
// for a hash.
static DUMMY_DIGEST: Lazy<String> =
    Lazy::new(|| hash("taskejo-placeholder-credential").unwrap_or_default());

/// Hash a plaintext password into a salted PHC-string digest.
///
/// Two calls with the same input produce different digests.
///
/// # Errors
/// Returns an error if the hash cannot be computed.
pub(super) fn hash(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|err| anyhow!("password hashing failed: {err}"))
}

/// Verify a plaintext password against a stored digest.
///
/// The comparison is constant-time. Malformed digests fail closed: the
/// mismatch is logged and the caller only ever sees `false`.
pub(super) fn verify(plaintext: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("malformed password digest: {err}");
            return false;
        }
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

/// Digest used to equalize sign-in work for unknown usernames.
pub(super) fn dummy_digest() -> &'static str {
    &DUMMY_DIGEST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_hashed_password() {
        let digest = hash("kukurbo-sekreta").expect("hash password");
        assert!(verify("kukurbo-sekreta", &digest));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let digest = hash("kukurbo-sekreta").expect("hash password");
        assert!(!verify("alia-pasvorto", &digest));
    }

    #[test]
    fn hash_is_salted() {
        let first = hash("sama-pasvorto").expect("hash password");
        let second = hash("sama-pasvorto").expect("hash password");
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
    }

    #[test]
    fn verify_fails_closed_on_malformed_digest() {
        assert!(!verify("whatever", "not-a-digest"));
        assert!(!verify("whatever", ""));
    }

    #[test]
    fn empty_password_round_trips() {
        let digest = hash("").expect("hash password");
        assert!(verify("", &digest));
        assert!(!verify("not-empty", &digest));
    }

    #[test]
    fn dummy_digest_is_well_formed() {
        assert!(dummy_digest().starts_with("$argon2"));
        assert!(!verify("whatever", dummy_digest()));
    }
}
