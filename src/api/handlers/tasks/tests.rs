//! Handler tests for the tasks API.
//!
//! These tests exercise the Axum handlers through `oneshot` requests. The
//! connection pool is created lazily and never touched: every case here must
//! be decided (401/400/404) before any SQL would run, which is exactly the
//! property being tested.

use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    routing::{get, patch},
    Extension, Router,
};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use super::super::auth::{issue_token_for_tests, AuthConfig, AuthState};

fn lazy_pool() -> anyhow::Result<PgPool> {
    // Never connects unless a query runs.
    Ok(PgPoolOptions::new().connect_lazy("postgres://taskejo@localhost:5432/taskejo")?)
}

fn auth_state() -> Arc<AuthState> {
    Arc::new(AuthState::new(
        &secrecy::SecretString::from("test-signing-secret".to_string()),
        AuthConfig::new(),
    ))
}

fn app_router(pool: PgPool, state: Arc<AuthState>) -> Router {
    Router::new()
        .route(
            "/v1/tasks",
            axum::routing::post(super::create_task).get(super::list_tasks),
        )
        .route(
            "/v1/tasks/:id",
            get(super::get_task).delete(super::delete_task),
        )
        .route("/v1/tasks/:id/status", patch(super::update_task_status))
        .layer(Extension(pool))
        .layer(Extension(state))
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[tokio::test]
async fn missing_token_is_unauthorized_everywhere() -> anyhow::Result<()> {
    let app = app_router(lazy_pool()?, auth_state());
    let id = Uuid::new_v4();

    for (method, uri) in [
        ("GET", "/v1/tasks".to_string()),
        ("POST", "/v1/tasks".to_string()),
        ("GET", format!("/v1/tasks/{id}")),
        ("DELETE", format!("/v1/tasks/{id}")),
        ("PATCH", format!("/v1/tasks/{id}/status")),
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

#[tokio::test]
async fn tampered_token_is_unauthorized() -> anyhow::Result<()> {
    let state = auth_state();
    let app = app_router(lazy_pool()?, state.clone());

    let mut token = issue_token_for_tests(&state, Uuid::new_v4(), "alice")?;
    token.push('x');

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/tasks")
                .header(AUTHORIZATION, bearer(&token))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn create_task_requires_title() -> anyhow::Result<()> {
    let state = auth_state();
    let app = app_router(lazy_pool()?, state.clone());
    let token = issue_token_for_tests(&state, Uuid::new_v4(), "alice")?;

    let payload = json!({ "title": "   " });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/tasks")
                .header(AUTHORIZATION, bearer(&token))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn create_task_requires_payload() -> anyhow::Result<()> {
    let state = auth_state();
    let app = app_router(lazy_pool()?, state.clone());
    let token = issue_token_for_tests(&state, Uuid::new_v4(), "alice")?;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/tasks")
                .header(AUTHORIZATION, bearer(&token))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn short_search_term_is_rejected() -> anyhow::Result<()> {
    let state = auth_state();
    let app = app_router(lazy_pool()?, state.clone());
    let token = issue_token_for_tests(&state, Uuid::new_v4(), "alice")?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/tasks?search=ab")
                .header(AUTHORIZATION, bearer(&token))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn invalid_status_filter_is_rejected() -> anyhow::Result<()> {
    let state = auth_state();
    let app = app_router(lazy_pool()?, state.clone());
    let token = issue_token_for_tests(&state, Uuid::new_v4(), "alice")?;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/tasks?status=CLOSED")
                .header(AUTHORIZATION, bearer(&token))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn malformed_task_id_reads_as_not_found() -> anyhow::Result<()> {
    let state = auth_state();
    let app = app_router(lazy_pool()?, state.clone());
    let token = issue_token_for_tests(&state, Uuid::new_v4(), "alice")?;

    for (method, uri) in [
        ("GET", "/v1/tasks/not-a-uuid".to_string()),
        ("DELETE", "/v1/tasks/not-a-uuid".to_string()),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(AUTHORIZATION, bearer(&token))
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let payload = json!({ "status": "DONE" });
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/v1/tasks/not-a-uuid/status")
                .header(AUTHORIZATION, bearer(&token))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_status_value_reads_as_missing_payload() -> anyhow::Result<()> {
    let state = auth_state();
    let app = app_router(lazy_pool()?, state.clone());
    let token = issue_token_for_tests(&state, Uuid::new_v4(), "alice")?;

    let payload = json!({ "status": "CLOSED" });
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/v1/tasks/{}/status", Uuid::new_v4()))
                .header(AUTHORIZATION, bearer(&token))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
