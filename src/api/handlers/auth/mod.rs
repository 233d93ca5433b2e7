//! Auth handlers and supporting modules.
//!
//! This module coordinates credentials and sessions: argon2 password hashing,
//! username/password sign-up and sign-in, and signed session tokens.
//!
//! ## Credentials
//!
//! Passwords are hashed with a per-credential random salt before they reach
//! the database; the plaintext is dropped as soon as the digest exists.
//! Username uniqueness is enforced by the database, so concurrent sign-ups
//! with the same name resolve to exactly one winner.
//!
//! ## Sessions
//!
//! Sessions are stateless: a signed, time-bounded token (HS256) encodes the
//! principal's identity. The signing secret is injected once at startup and
//! lives only inside the token signer. There is no revocation list; a token
//! stays valid until its expiry.
//!
//! > **Warning:** Rotating the signing secret invalidates every outstanding
//! > session token.
//!
//! Sign-in collapses "unknown username" and "wrong password" into a single
//! `Invalid credentials` outcome so accounts cannot be enumerated.

pub(crate) mod login;
mod password;
pub(crate) mod principal;
pub(crate) mod service;
pub(crate) mod signup;
mod state;
mod storage;
mod token;
pub(crate) mod types;
mod utils;

pub use state::{AuthConfig, AuthState};


/// Issue a token outside the sign-up/sign-in flow, for handler tests.
#[cfg(test)]
pub(crate) fn issue_token_for_tests(
    state: &AuthState,
    user_id: uuid::Uuid,
    username: &str,
) -> anyhow::Result<String> {
    state.signer().issue(user_id, username)
}
