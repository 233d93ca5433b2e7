//! Sign-in endpoint.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;

use super::{
    service,
    state::AuthState,
    types::{CredentialsRequest, TokenResponse},
};

#[utoipa::path(
    post,
    path = "/v1/auth/signin",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Session token issued", body = TokenResponse),
        (status = 400, description = "Validation error", body = String),
        (status = 401, description = "Invalid credentials", body = String)
    ),
    tag = "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CredentialsRequest>>,
) -> impl IntoResponse {
    let request: CredentialsRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    // No shape checks beyond presence: a username that would fail sign-up
    // validation simply fails sign-in the same way any unknown user does.
    let username = request.username.trim();
    if username.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing username".to_string()).into_response();
    }

    match service::sign_in(&pool, &auth_state, username, &request.password).await {
        Ok(token) => (
            StatusCode::OK,
            Json(TokenResponse {
                access_token: token,
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
