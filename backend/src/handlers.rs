use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use shared::{ApiMessage, NewTask, Task, TaskPatch};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{ApiError, AppJson};
use crate::SharedStore;

pub async fn list_tasks(State(store): State<SharedStore>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = store.list().await.map_err(|err| {
        error!(%err, "get tasks failed");
        ApiError::read(err)
    })?;
    info!(count = tasks.len(), "get tasks successful");
    Ok(Json(tasks))
}

pub async fn get_task(
    Path(id): Path<Uuid>,
    State(store): State<SharedStore>,
) -> Result<Json<Task>, ApiError> {
    let task = store.get(id).await.map_err(|err| {
        error!(%id, %err, "get task by id failed");
        ApiError::read(err)
    })?;
    info!(%id, "get task by id successful");
    Ok(Json(task))
}

pub async fn create_task(
    State(store): State<SharedStore>,
    AppJson(draft): AppJson<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = store.insert(draft).await.map_err(|err| {
        error!(%err, "create task failed");
        ApiError::write(err)
    })?;
    info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    Path(id): Path<Uuid>,
    State(store): State<SharedStore>,
    AppJson(patch): AppJson<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let task = store.replace(id, patch).await.map_err(|err| {
        error!(%id, %err, "update task failed");
        ApiError::write(err)
    })?;
    info!(%id, "task updated");
    Ok(Json(task))
}

pub async fn delete_task(
    Path(id): Path<Uuid>,
    State(store): State<SharedStore>,
) -> Result<Json<ApiMessage>, ApiError> {
    store.remove(id).await.map_err(|err| {
        error!(%id, %err, "delete task failed");
        ApiError::read(err)
    })?;
    info!(%id, "task deleted");
    Ok(Json(ApiMessage::new("Task deleted")))
}
