//! Task CRUD operations and the kanban helpers.

use crate::{
    client::Client,
    error::Result,
    pagination::{Page, PageQuery},
    request::RequestSpec,
    resources::to_body,
};
use http::Method;
use serde::{Deserialize, Serialize};

/// Where a task sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStage {
    Backlog,
    InProgress,
    Blocked,
    Done,
    Cancelled,
}

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A task record as the server returns it.
///
/// The `dl__` wire prefixes come from the server's datalist columns and are
/// kept verbatim on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub descr: Option<String>,
    #[serde(default, rename = "dl__task_stage")]
    pub stage: Option<TaskStage>,
    #[serde(default, rename = "dl__task_priority")]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub actual_hours: Option<f64>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    pub created_ts: String,
    pub updated_ts: String,
}

/// Input for creating a task. Only `name` is required.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "dl__task_stage")]
    pub stage: Option<TaskStage>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "dl__task_priority")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl TaskCreate {
    /// Creates an input with the required name and no optional fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            descr: None,
            stage: None,
            priority: None,
            estimated_hours: None,
            metadata: None,
        }
    }
}

/// Partial update for a task; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "dl__task_stage")]
    pub stage: Option<TaskStage>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "dl__task_priority")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Client {
    /// Lists tasks with paging and optional search.
    pub async fn list_tasks(&self, query: PageQuery) -> Result<Page<Task>> {
        let spec =
            RequestSpec::new(Method::GET, "/task").with_query_pairs(query.to_query_pairs());
        self.execute(spec).await
    }

    /// Fetches one task by id.
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        self.execute(RequestSpec::new(Method::GET, format!("/task/{task_id}")))
            .await
    }

    /// Creates a new task.
    pub async fn create_task(&self, input: TaskCreate) -> Result<Task> {
        let spec = RequestSpec::new(Method::POST, "/task").with_body(to_body(&input)?);
        self.execute(spec).await
    }

    /// Updates a task; only the fields set on `input` are sent.
    pub async fn update_task(&self, task_id: &str, input: TaskUpdate) -> Result<Task> {
        let spec =
            RequestSpec::new(Method::PUT, format!("/task/{task_id}")).with_body(to_body(&input)?);
        self.execute(spec).await
    }

    /// Deletes a task by id.
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.execute_empty(RequestSpec::new(Method::DELETE, format!("/task/{task_id}")))
            .await
    }

    /// Moves a task to a new stage, optionally positioning it on the board.
    pub async fn update_task_stage(
        &self,
        task_id: &str,
        stage: TaskStage,
        position: Option<u32>,
    ) -> Result<Task> {
        let mut body = serde_json::json!({ "task_status": stage });
        if let Some(position) = position {
            body["position"] = serde_json::json!(position);
        }

        let spec =
            RequestSpec::new(Method::PATCH, format!("/task/{task_id}/status")).with_body(body);
        self.execute(spec).await
    }

    /// Attaches a case note to a task.
    pub async fn add_case_note(&self, task_id: &str, content: &str) -> Result<serde_json::Value> {
        let spec = RequestSpec::new(Method::POST, format!("/task/{task_id}/case-note")).with_body(
            serde_json::json!({
                "content": content,
                "content_type": "case_note",
            }),
        );
        self.execute(spec).await
    }

    /// Fetches the kanban board view, optionally scoped to one project.
    pub async fn kanban_board(&self, project_id: Option<&str>) -> Result<serde_json::Value> {
        let mut spec = RequestSpec::new(Method::GET, "/task/kanban");
        if let Some(project_id) = project_id {
            spec = spec.with_query("projectId", project_id);
        }
        self.execute(spec).await
    }
}
