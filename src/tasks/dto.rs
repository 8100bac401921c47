use serde::{Deserialize, Serialize};

use super::repo_types::Task;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub message: String,
    pub task: Task,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}
