//! Sign-up and sign-in orchestration.
//!
//! Flow Overview: sign-up hashes the password, creates the credential, and
//! only then issues a token, so a failed insert can never leave a valid token
//! for a principal that does not exist. Sign-in collapses "unknown username"
//! and "wrong password" into one outcome.

use axum::{http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use thiserror::Error;
use tokio::task;
use tracing::error;

use super::{
    password,
    state::AuthState,
    storage::{self, CreateUserOutcome, UserRecord},
};

/// Failure kinds surfaced at the auth boundary.
#[derive(Debug, Error)]
pub(super) enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for AuthError {
    /// Storage failures are logged server-side and surfaced as bare `500`s.
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::DuplicateUsername => {
                (StatusCode::CONFLICT, "Username already exists").into_response()
            }
            Self::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials").into_response()
            }
            Self::Storage(err) => {
                error!("Auth storage error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Create a credential and issue a session token for the new principal.
pub(super) async fn sign_up(
    pool: &PgPool,
    auth_state: &AuthState,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let digest = hash_on_blocking_pool(password).await?;

    match storage::insert_user(pool, username, &digest).await? {
        CreateUserOutcome::Conflict => Err(AuthError::DuplicateUsername),
        CreateUserOutcome::Created(user) => issue_token(auth_state, &user),
    }
}

/// Verify a credential and issue a session token for the principal.
///
/// Unknown usernames still pay for a digest verification, keeping the two
/// failure paths as close in timing as practical.
pub(super) async fn sign_in(
    pool: &PgPool,
    auth_state: &AuthState,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let record = storage::lookup_user_by_username(pool, username).await?;

    match record {
        Some(user) => {
            let verified = verify_on_blocking_pool(password, &user.password_hash).await?;
            if verified {
                issue_token(auth_state, &user)
            } else {
                Err(AuthError::InvalidCredentials)
            }
        }
        None => {
            let _ = verify_on_blocking_pool(password, password::dummy_digest()).await?;
            Err(AuthError::InvalidCredentials)
        }
    }
}

// Hashing is CPU-bound and deliberately slow; keep it off the async workers.
async fn hash_on_blocking_pool(password: &str) -> Result<String, AuthError> {
    let plaintext = password.to_string();
    let digest = task::spawn_blocking(move || password::hash(&plaintext))
        .await
        .map_err(|err| AuthError::Storage(err.into()))??;
    Ok(digest)
}

async fn verify_on_blocking_pool(password: &str, digest: &str) -> Result<bool, AuthError> {
    let plaintext = password.to_string();
    let digest = digest.to_string();
    let verified = task::spawn_blocking(move || password::verify(&plaintext, &digest))
        .await
        .map_err(|err| AuthError::Storage(err.into()))?;
    Ok(verified)
}

fn issue_token(auth_state: &AuthState, user: &UserRecord) -> Result<String, AuthError> {
    auth_state
        .signer()
        .issue(user.user_id, &user.username)
        .map_err(AuthError::Storage)
}
