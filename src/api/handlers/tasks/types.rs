//! Request/response types for task endpoints.
//!
//! These payloads are shared between handlers and `OpenAPI` generation.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::status::TaskStatus;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// Listing filters; when both are present they are ANDed.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Exact status match.
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring match against title or description.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_task_request_defaults_description() -> anyhow::Result<()> {
        let decoded: CreateTaskRequest = serde_json::from_value(serde_json::json!({
            "title": "buy milk"
        }))?;
        assert_eq!(decoded.title, "buy milk");
        assert_eq!(decoded.description, None);
        Ok(())
    }

    #[test]
    fn update_status_request_parses_enum() -> anyhow::Result<()> {
        let decoded: UpdateTaskStatusRequest = serde_json::from_value(serde_json::json!({
            "status": "IN_PROGRESS"
        }))?;
        assert_eq!(decoded.status, TaskStatus::InProgress);
        Ok(())
    }

    #[test]
    fn list_query_defaults_to_no_filters() {
        let query = ListTasksQuery::default();
        assert!(query.status.is_none());
        assert!(query.search.is_none());
    }

    #[test]
    fn task_response_serializes_status_as_text() -> anyhow::Result<()> {
        let response = TaskResponse {
            id: "3f0f8f6a-0000-0000-0000-000000000000".to_string(),
            title: "buy milk".to_string(),
            description: String::new(),
            status: TaskStatus::Open,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };
        let value = serde_json::to_value(&response)?;
        assert_eq!(value["status"], "OPEN");
        Ok(())
    }
}
