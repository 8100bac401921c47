use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{CreateTaskRequest, DeletedResponse, TaskListResponse, TaskResponse, UpdateTaskRequest},
    repo::{self, TaskChanges},
    repo_types::Priority,
};
use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

const PRIORITY_MSG: &str = "Priority must be low, medium, or high";

fn parse_priority(value: &str) -> Result<Priority, ApiError> {
    Priority::parse(value).ok_or_else(|| ApiError::validation(PRIORITY_MSG))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn list_tasks(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<TaskListResponse>, ApiError> {
    let tasks = repo::list_by_user(state.store.as_ref(), &user.0.id).await?;
    Ok(Json(TaskListResponse { tasks }))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.0.id))]
pub async fn create_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let title = match payload.title {
        Some(title) if !title.is_empty() => title,
        _ => {
            warn!("task title missing");
            return Err(ApiError::validation("Task title is required"));
        }
    };
    let priority = match payload.priority.as_deref().filter(|v| !v.is_empty()) {
        Some(value) => parse_priority(value)?,
        None => Priority::default(),
    };

    let task = repo::create(
        state.store.as_ref(),
        &user.0.id,
        title,
        payload.description.unwrap_or_default(),
        priority,
        payload.completed.unwrap_or(false),
    )
    .await?;

    info!(task_id = %task.id, "task created");
    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            message: "Task created successfully".into(),
            task,
        }),
    ))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.0.id, task_id = %id))]
pub async fn update_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    let priority = match payload.priority.as_deref().filter(|v| !v.is_empty()) {
        Some(value) => Some(parse_priority(value)?),
        None => None,
    };
    let changes = TaskChanges {
        title: payload.title,
        description: payload.description,
        priority,
        completed: payload.completed,
    };

    let task = repo::update_owned(state.store.as_ref(), &user.0.id, &id, changes).await?;

    info!(task_id = %task.id, "task updated");
    Ok(Json(TaskResponse {
        message: "Task updated successfully".into(),
        task,
    }))
}

#[instrument(skip(state, user), fields(user_id = %user.0.id, task_id = %id))]
pub async fn delete_task(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    repo::delete_owned(state.store.as_ref(), &user.0.id, &id).await?;

    info!(task_id = %id, "task deleted");
    Ok(Json(DeletedResponse {
        message: "Task deleted successfully".into(),
    }))
}
