use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    models::{
        Assignment, AssignmentOutcome, ConfirmAssignmentInput, DeclineAssignmentInput,
        DirectConfirmInput, MarkNoShowInput, RequestAssignmentInput,
    },
    AppResult, AppState,
};

/// POST /api/assignments — a worker requests a shift (creates `pending`)
#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = RequestAssignmentInput,
    responses(
        (status = 200, description = "Pending assignment created", body = AssignmentOutcome),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Worker already has a live assignment on the shift, or shift no longer open")
    ),
    tag = "assignments"
)]
pub async fn request_assignment(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RequestAssignmentInput>,
) -> AppResult<Json<AssignmentOutcome>> {
    let outcome = state.engine.request_assignment(input).await?;
    Ok(Json(outcome))
}

/// POST /api/assignments/confirm — administrative fast path, creates
/// directly in `confirmed` when capacity allows
#[utoipa::path(
    post,
    path = "/api/assignments/confirm",
    request_body = DirectConfirmInput,
    responses(
        (status = 200, description = "Assignment created and confirmed", body = AssignmentOutcome),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Capacity exceeded, duplicate assignment, or scheduling conflict")
    ),
    tag = "assignments"
)]
pub async fn direct_confirm(
    State(state): State<Arc<AppState>>,
    Json(input): Json<DirectConfirmInput>,
) -> AppResult<Json<AssignmentOutcome>> {
    let outcome = state.engine.direct_confirm(input).await?;
    Ok(Json(outcome))
}

/// GET /api/assignments/{id}
#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = Uuid, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Assignment record", body = Assignment),
        (status = 404, description = "Assignment not found")
    ),
    tag = "assignments"
)]
pub async fn get_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Assignment>> {
    let assignment = state.engine.get_assignment(id).await?;
    Ok(Json(assignment))
}

/// POST /api/assignments/{id}/confirm
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/confirm",
    params(("id" = Uuid, Path, description = "Assignment id")),
    request_body = ConfirmAssignmentInput,
    responses(
        (status = 200, description = "Assignment confirmed", body = AssignmentOutcome),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "Capacity exceeded, conflict, or illegal transition")
    ),
    tag = "assignments"
)]
pub async fn confirm_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<ConfirmAssignmentInput>,
) -> AppResult<Json<AssignmentOutcome>> {
    let outcome = state.engine.confirm_assignment(id, &input.actor).await?;
    Ok(Json(outcome))
}

/// POST /api/assignments/{id}/decline — decline a request or remove a
/// confirmed worker
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/decline",
    params(("id" = Uuid, Path, description = "Assignment id")),
    request_body = DeclineAssignmentInput,
    responses(
        (status = 200, description = "Assignment declined", body = AssignmentOutcome),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "Illegal transition")
    ),
    tag = "assignments"
)]
pub async fn decline_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<DeclineAssignmentInput>,
) -> AppResult<Json<AssignmentOutcome>> {
    let outcome = state
        .engine
        .decline_assignment(id, &input.actor, &input.reason)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/assignments/{id}/complete
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/complete",
    params(("id" = Uuid, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Assignment completed", body = AssignmentOutcome),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "Illegal transition")
    ),
    tag = "assignments"
)]
pub async fn complete_assignment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AssignmentOutcome>> {
    let outcome = state.engine.complete_assignment(id).await?;
    Ok(Json(outcome))
}

/// POST /api/assignments/{id}/no-show — free the slot, keep the flag
#[utoipa::path(
    post,
    path = "/api/assignments/{id}/no-show",
    params(("id" = Uuid, Path, description = "Assignment id")),
    request_body = MarkNoShowInput,
    responses(
        (status = 200, description = "Worker marked as no-show", body = AssignmentOutcome),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "Illegal transition")
    ),
    tag = "assignments"
)]
pub async fn mark_no_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<MarkNoShowInput>,
) -> AppResult<Json<AssignmentOutcome>> {
    let outcome = state.engine.mark_no_show(id, &input.actor).await?;
    Ok(Json(outcome))
}
