use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    models::{Assignment, Worker},
    AppError, AppResult, AppState,
};

/// GET /api/workers — directory listing
#[utoipa::path(
    get,
    path = "/api/workers",
    responses(
        (status = 200, description = "All workers known to the directory", body = Vec<Worker>)
    ),
    tag = "workers"
)]
pub async fn get_workers(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Worker>>> {
    let workers = state.directory.list_workers().await;
    Ok(Json(workers))
}

/// GET /api/workers/{id}
#[utoipa::path(
    get,
    path = "/api/workers/{id}",
    params(("id" = i32, Path, description = "Worker id")),
    responses(
        (status = 200, description = "Worker record", body = Worker),
        (status = 404, description = "Worker not found")
    ),
    tag = "workers"
)]
pub async fn get_worker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Worker>> {
    let worker = state
        .directory
        .get_worker(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Worker {} not found", id)))?;
    Ok(Json(worker))
}

/// GET /api/workers/{id}/assignments — the worker's full history
#[utoipa::path(
    get,
    path = "/api/workers/{id}/assignments",
    params(("id" = i32, Path, description = "Worker id")),
    responses(
        (status = 200, description = "Assignment history for the worker", body = Vec<Assignment>)
    ),
    tag = "workers"
)]
pub async fn get_worker_assignments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Assignment>>> {
    let assignments = state.engine.assignments_for_worker(id).await?;
    Ok(Json(assignments))
}
