//! Shared SQL storage helpers for task entities.
//!
//! Every statement here carries the owner in its predicate: lookups and
//! mutations are keyed by `(id, user_id)` and listings filter on `user_id`.
//! A task owned by someone else therefore produces the same `NotFound` as a
//! task that does not exist.

use axum::{http::StatusCode, response::IntoResponse};
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::error;
use uuid::Uuid;

use super::{status::TaskStatus, types::TaskResponse};

#[derive(Debug)]
pub(super) struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
    status: TaskStatus,
    created_at: String,
}

impl TaskRow {
    /// Converts this row into a `TaskResponse` DTO for API responses.
    /// The owner id stays inside the storage layer.
    pub(super) fn to_response(&self) -> TaskResponse {
        TaskResponse {
            id: self.id.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            created_at: self.created_at.clone(),
        }
    }
}

#[derive(Debug)]
pub(super) enum TaskError {
    NotFound,
    Decode(&'static str),
    Database(sqlx::Error),
}

impl IntoResponse for TaskError {
    /// Maps storage-layer failures into stable HTTP responses for handlers.
    /// Database errors are logged server-side and surfaced as `500` without leaking details.
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Decode(message) => {
                error!("Row decode error: {message}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Database(err) => {
                error!("Database error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Inserts a task owned by `user_id` with status `OPEN` and a fresh id.
pub(super) async fn insert_task(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    description: &str,
) -> Result<TaskRow, TaskError> {
    let row = sqlx::query(
        r#"
        INSERT INTO tasks (title, description, user_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, description, status::text AS status,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(TaskError::Database)?;

    row_to_task(&row)
}

/// Lists tasks owned by `user_id`, oldest first.
///
/// Optional predicates: exact status match and case-insensitive substring
/// match against title or description. Both are ANDed when present.
pub(super) async fn fetch_tasks_for_user(
    pool: &PgPool,
    user_id: Uuid,
    status: Option<TaskStatus>,
    search: Option<&str>,
) -> Result<Vec<TaskRow>, TaskError> {
    let query = r#"
        SELECT id, title, description, status::text AS status,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
        FROM tasks
        WHERE user_id = $1
          AND ($2::text IS NULL OR status::text = $2)
          AND ($3::text IS NULL
               OR title ILIKE '%' || $3 || '%'
               OR description ILIKE '%' || $3 || '%')
        ORDER BY created_at
    "#;
    let rows = sqlx::query(query)
        .bind(user_id)
        .bind(status.map(TaskStatus::as_str))
        .bind(search)
        .fetch_all(pool)
        .await
        .map_err(TaskError::Database)?;

    rows.iter().map(row_to_task).collect()
}

/// Resolves a task by `(id, user_id)`; missing and not-owned are both `NotFound`.
pub(super) async fn resolve_task(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<TaskRow, TaskError> {
    let row = sqlx::query(
        r#"
        SELECT id, title, description, status::text AS status,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
        FROM tasks
        WHERE id = $1 AND user_id = $2
        LIMIT 1
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(TaskError::Database)?;

    match row {
        Some(row) => row_to_task(&row),
        None => Err(TaskError::NotFound),
    }
}

/// Updates only the status field of an owned task and returns the new row.
pub(super) async fn update_task_record(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    status: TaskStatus,
) -> Result<TaskRow, TaskError> {
    let row = sqlx::query(
        r#"
        UPDATE tasks
        SET status = $3::task_status
        WHERE id = $1 AND user_id = $2
        RETURNING id, title, description, status::text AS status,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
    .map_err(TaskError::Database)?;

    match row {
        Some(row) => row_to_task(&row),
        None => Err(TaskError::NotFound),
    }
}

/// Deletes an owned task.
///
/// The predicate encodes "id AND owner", so zero rows affected is the only
/// `NotFound` signal needed; there is no read-then-delete race.
pub(super) async fn delete_task_record(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), TaskError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(TaskError::Database)?;

    if result.rows_affected() == 0 {
        return Err(TaskError::NotFound);
    }
    Ok(())
}

fn row_to_task(row: &PgRow) -> Result<TaskRow, TaskError> {
    let status: String = row.get("status");
    let Some(status) = TaskStatus::parse(&status) else {
        return Err(TaskError::Decode("unknown task status"));
    };

    Ok(TaskRow {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        status,
        created_at: row.get("created_at"),
    })
}
