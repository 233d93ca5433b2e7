//! Authenticated principal extraction.
//!
//! Flow Overview: read the bearer token from the Authorization header, verify
//! it against the process-wide signer, and return a principal downstream
//! handlers can scope by. No database access happens here; tokens are
//! self-contained.

use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use tracing::debug;
use uuid::Uuid;

use super::state::AuthState;

/// Authenticated user context derived from the session token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
}

/// Resolve a bearer token into a principal, or return 401.
///
/// Missing, malformed, tampered, and expired tokens are rejected identically;
/// the reason only shows up in debug logs.
pub fn require_auth(headers: &HeaderMap, auth_state: &AuthState) -> Result<Principal, StatusCode> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let claims = auth_state.signer().verify(&token).map_err(|err| {
        debug!("session token rejected: {err}");
        StatusCode::UNAUTHORIZED
    })?;

    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        debug!("session token subject is not a uuid");
        return Err(StatusCode::UNAUTHORIZED);
    };

    Ok(Principal {
        user_id,
        username: claims.username,
    })
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
