use time::OffsetDateTime;

use super::repo_types::{Priority, Task};
use crate::error::ApiError;
use crate::store::{generate_id, Store, StoreError};

pub const NOT_FOUND_MSG: &str = "Task not found or access denied";

/// Field-by-field changes for a partial update.
#[derive(Debug, Default, Clone)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

pub async fn list_by_user(store: &dyn Store, user_id: &str) -> Result<Vec<Task>, StoreError> {
    let doc = store.load().await?;
    Ok(doc
        .tasks
        .into_iter()
        .filter(|t| t.user_id == user_id)
        .collect())
}

pub async fn create(
    store: &dyn Store,
    user_id: &str,
    title: String,
    description: String,
    priority: Priority,
    completed: bool,
) -> Result<Task, StoreError> {
    let now = OffsetDateTime::now_utc();
    let task = Task {
        id: generate_id(),
        title,
        description,
        priority,
        completed,
        user_id: user_id.to_string(),
        created_at: now,
        updated_at: now,
    };
    let record = task.clone();
    store
        .update(Box::new(move |doc| doc.tasks.push(record)))
        .await?;
    Ok(task)
}

/// Resolves the caller's task or the API's deliberately conflated 404.
/// Internally a foreign task is `AccessDenied`, an absent one `NotFound`;
/// the wire response is identical.
async fn check_owned(store: &dyn Store, user_id: &str, task_id: &str) -> Result<(), ApiError> {
    let doc = store.load().await?;
    match doc.tasks.iter().find(|t| t.id == task_id) {
        None => Err(ApiError::not_found(NOT_FOUND_MSG)),
        Some(task) if task.user_id != user_id => Err(ApiError::access_denied(NOT_FOUND_MSG)),
        Some(_) => Ok(()),
    }
}

pub async fn update_owned(
    store: &dyn Store,
    user_id: &str,
    task_id: &str,
    changes: TaskChanges,
) -> Result<Task, ApiError> {
    check_owned(store, user_id, task_id).await?;

    let id = task_id.to_string();
    let owner = user_id.to_string();
    let doc = store
        .update(Box::new(move |doc| {
            if let Some(task) = doc
                .tasks
                .iter_mut()
                .find(|t| t.id == id && t.user_id == owner)
            {
                if let Some(title) = changes.title {
                    task.title = title;
                }
                if let Some(description) = changes.description {
                    task.description = description;
                }
                if let Some(priority) = changes.priority {
                    task.priority = priority;
                }
                if let Some(completed) = changes.completed {
                    task.completed = completed;
                }
                task.updated_at = OffsetDateTime::now_utc();
            }
        }))
        .await?;

    doc.tasks
        .into_iter()
        .find(|t| t.id == task_id)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MSG))
}

pub async fn delete_owned(
    store: &dyn Store,
    user_id: &str,
    task_id: &str,
) -> Result<(), ApiError> {
    check_owned(store, user_id, task_id).await?;

    let id = task_id.to_string();
    let owner = user_id.to_string();
    store
        .update(Box::new(move |doc| {
            doc.tasks.retain(|t| !(t.id == id && t.user_id == owner));
        }))
        .await?;
    Ok(())
}
