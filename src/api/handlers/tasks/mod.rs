//! Owner-scoped task endpoints.
//!
//! Tasks are private to their owner. Every handler first resolves the
//! principal from the bearer token, then calls storage helpers whose SQL is
//! keyed by `(id, user_id)`, so a task owned by another user returns the same
//! `404` as a task that does not exist. Malformed task ids get the same
//! treatment: a non-UUID id cannot name an owned task.
//!
//! This module is split into route handlers here plus a shared storage layer
//! so the HTTP surface stays easy to read and the SQL logic stays easy to
//! test. The handlers only parse inputs and map the high-level flow, while
//! `storage` owns database queries and response shaping.
//!
//! Flow Overview:
//! 1) Authenticate via bearer token.
//! 2) Validate inputs (title, status, search term).
//! 3) Perform owner-scoped CRUD against the tasks table.

mod status;
mod storage;
pub(crate) mod types;

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::auth::{principal::require_auth, AuthState};
use storage::{
    delete_task_record, fetch_tasks_for_user, insert_task, resolve_task, update_task_record,
};
use types::{CreateTaskRequest, ListTasksQuery, TaskResponse, UpdateTaskStatusRequest};

const SEARCH_TERM_MIN: usize = 3;

#[utoipa::path(
    post,
    path = "/v1/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created.", body = TaskResponse),
        (status = 400, description = "Invalid input.", body = String),
        (status = 401, description = "Missing or invalid session token."),
    ),
    tag = "tasks"
)]
/// Creates a task owned by the authenticated user, starting at status `OPEN`.
pub async fn create_task(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CreateTaskRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let request: CreateTaskRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let title = request.title.trim();
    if title.is_empty() {
        return (StatusCode::BAD_REQUEST, "Task title is required.").into_response();
    }
    let description = request.description.unwrap_or_default();

    match insert_task(&pool, principal.user_id, title, &description).await {
        Ok(task) => {
            debug!(user = %principal.username, "task created");
            (StatusCode::CREATED, Json(task.to_response())).into_response()
        }
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/v1/tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "List tasks.", body = [TaskResponse]),
        (status = 400, description = "Invalid filter.", body = String),
        (status = 401, description = "Missing or invalid session token."),
    ),
    tag = "tasks"
)]
/// Lists the authenticated user's tasks, optionally narrowed by status and
/// a case-insensitive search term.
pub async fn list_tasks(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    Query(query): Query<ListTasksQuery>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty());
    if let Some(term) = search {
        if term.chars().count() < SEARCH_TERM_MIN {
            return (
                StatusCode::BAD_REQUEST,
                "Search term must be at least 3 characters.",
            )
                .into_response();
        }
    }

    match fetch_tasks_for_user(&pool, principal.user_id, query.status, search).await {
        Ok(rows) => {
            let tasks: Vec<TaskResponse> = rows.iter().map(storage::TaskRow::to_response).collect();
            (StatusCode::OK, Json(tasks)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task detail.", body = TaskResponse),
        (status = 401, description = "Missing or invalid session token."),
        (status = 404, description = "Task not found."),
    ),
    tag = "tasks"
)]
/// Fetches a single owned task; not-owned and missing are both `404`.
pub async fn get_task(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let Ok(id) = Uuid::parse_str(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match resolve_task(&pool, principal.user_id, id).await {
        Ok(task) => (StatusCode::OK, Json(task.to_response())).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/v1/tasks/{id}/status",
    request_body = UpdateTaskStatusRequest,
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task updated.", body = TaskResponse),
        (status = 400, description = "Invalid input.", body = String),
        (status = 401, description = "Missing or invalid session token."),
        (status = 404, description = "Task not found."),
    ),
    tag = "tasks"
)]
/// Sets an owned task's status; any status-to-status transition is allowed.
pub async fn update_task_status(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<UpdateTaskStatusRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let request: UpdateTaskStatusRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let Ok(id) = Uuid::parse_str(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match update_task_record(&pool, principal.user_id, id, request.status).await {
        Ok(task) => (StatusCode::OK, Json(task.to_response())).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted."),
        (status = 401, description = "Missing or invalid session token."),
        (status = 404, description = "Task not found."),
    ),
    tag = "tasks"
)]
/// Deletes an owned task; the owner predicate lives in the SQL itself.
pub async fn delete_task(
    Path(id): Path<String>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &auth_state) {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let Ok(id) = Uuid::parse_str(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match delete_task_record(&pool, principal.user_id, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests;
