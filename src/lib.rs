//! # Taskejo (Multi-Tenant Task Tracking)
//!
//! `taskejo` is a task-tracking service where each registered user owns a
//! private collection of tasks, reachable only through an authenticated
//! session.
//!
//! ## Authentication
//!
//! Passwords are hashed with argon2 (salted, memory-hard) and never stored or
//! logged in plaintext. Sign-up and sign-in issue a signed, time-bounded
//! session token (HS256 JWT); the signing secret is injected once at startup
//! and never leaves the token signer. There is no server-side session table:
//! token validity is purely a function of signature and expiry.
//!
//! ## Ownership Scoping
//!
//! Tasks belong to exactly one user. Every read, update, and delete is keyed
//! by `(id, user_id)` inside the SQL statement itself, so a task owned by
//! someone else is indistinguishable from a task that does not exist: both
//! return `404 Not Found`. This prevents cross-tenant resource enumeration.
//!
//! ## Error Surface
//!
//! - `409` duplicate username on sign-up
//! - `401` invalid credentials on sign-in (unknown user and wrong password are
//!   deliberately indistinguishable)
//! - `401` for any missing, malformed, tampered, or expired token
//! - `404` for missing-or-not-owned tasks

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
