//! Sign-up endpoint.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;

use super::{
    service,
    state::AuthState,
    types::{CredentialsRequest, TokenResponse},
    utils::{valid_password, valid_username},
};

#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created; session token issued", body = TokenResponse),
        (status = 400, description = "Validation error", body = String),
        (status = 409, description = "Username already exists", body = String)
    ),
    tag = "auth"
)]
pub async fn signup(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CredentialsRequest>>,
) -> impl IntoResponse {
    let request: CredentialsRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let username = request.username.trim();
    if !valid_username(username) {
        return (StatusCode::BAD_REQUEST, "Invalid username".to_string()).into_response();
    }
    if !valid_password(&request.password) {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    match service::sign_up(&pool, &auth_state, username, &request.password).await {
        Ok(token) => (
            StatusCode::CREATED,
            Json(TokenResponse {
                access_token: token,
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
