use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    models::{
        Assignment, CancelShiftInput, CancelShiftResponse, CreateShiftInput, Shift,
        StaffingSnapshot, UpdateShiftInput, Worker,
    },
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetShiftsQuery {
    pub date: String,
}

/// GET /api/shifts?date= — shifts for one calendar day
#[utoipa::path(
    get,
    path = "/api/shifts",
    params(GetShiftsQuery),
    responses(
        (status = 200, description = "Shifts on the given date", body = Vec<Shift>),
        (status = 400, description = "Invalid date format")
    ),
    tag = "shifts"
)]
pub async fn get_shifts_for_date(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetShiftsQuery>,
) -> AppResult<Json<Vec<Shift>>> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|e| AppError::BadRequest(format!("Invalid date format: {}", e)))?;

    let shifts = state.engine.shifts_for_date(date).await?;
    Ok(Json(shifts))
}

/// POST /api/shifts
#[utoipa::path(
    post,
    path = "/api/shifts",
    request_body = CreateShiftInput,
    responses(
        (status = 200, description = "Shift created", body = Shift),
        (status = 400, description = "Invalid capacity or time window")
    ),
    tag = "shifts"
)]
pub async fn create_shift(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateShiftInput>,
) -> AppResult<Json<Shift>> {
    if input.required_workers < 1 {
        return Err(AppError::BadRequest(
            "required_workers must be a positive integer".to_string(),
        ));
    }

    let shift = state.engine.create_shift(input).await?;
    Ok(Json(shift))
}

/// GET /api/shifts/{id}
#[utoipa::path(
    get,
    path = "/api/shifts/{id}",
    params(("id" = Uuid, Path, description = "Shift id")),
    responses(
        (status = 200, description = "Shift record", body = Shift),
        (status = 404, description = "Shift not found")
    ),
    tag = "shifts"
)]
pub async fn get_shift(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Shift>> {
    let shift = state.engine.get_shift(id).await?;
    Ok(Json(shift))
}

/// PUT /api/shifts/{id} — administrative capacity/time edit
#[utoipa::path(
    put,
    path = "/api/shifts/{id}",
    params(("id" = Uuid, Path, description = "Shift id")),
    request_body = UpdateShiftInput,
    responses(
        (status = 200, description = "Shift updated", body = Shift),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Capacity below confirmed count, or shift no longer editable")
    ),
    tag = "shifts"
)]
pub async fn update_shift(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateShiftInput>,
) -> AppResult<Json<Shift>> {
    if let Some(required) = input.required_workers {
        if required < 1 {
            return Err(AppError::BadRequest(
                "required_workers must be a positive integer".to_string(),
            ));
        }
    }

    let shift = state.engine.update_shift(id, input).await?;
    Ok(Json(shift))
}

/// GET /api/shifts/{id}/staffing — the read-optimized snapshot
#[utoipa::path(
    get,
    path = "/api/shifts/{id}/staffing",
    params(("id" = Uuid, Path, description = "Shift id")),
    responses(
        (status = 200, description = "Current staffing snapshot", body = StaffingSnapshot),
        (status = 404, description = "Shift not found")
    ),
    tag = "shifts"
)]
pub async fn get_staffing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StaffingSnapshot>> {
    let snapshot = state.engine.get_staffing(id).await?;
    Ok(Json(snapshot))
}

/// POST /api/shifts/{id}/cancel — cancel and cascade live assignments
#[utoipa::path(
    post,
    path = "/api/shifts/{id}/cancel",
    params(("id" = Uuid, Path, description = "Shift id")),
    request_body = CancelShiftInput,
    responses(
        (status = 200, description = "Shift cancelled, assignments cascaded", body = CancelShiftResponse),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Shift already cancelled or completed")
    ),
    tag = "shifts"
)]
pub async fn cancel_shift(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<CancelShiftInput>,
) -> AppResult<Json<CancelShiftResponse>> {
    let response = state.engine.cancel_shift(id, &input.reason).await?;
    Ok(Json(response))
}

/// GET /api/shifts/{id}/assignments — full history, terminal records included
#[utoipa::path(
    get,
    path = "/api/shifts/{id}/assignments",
    params(("id" = Uuid, Path, description = "Shift id")),
    responses(
        (status = 200, description = "Assignment history for the shift", body = Vec<Assignment>),
        (status = 404, description = "Shift not found")
    ),
    tag = "shifts"
)]
pub async fn get_shift_assignments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Assignment>>> {
    let assignments = state.engine.assignments_for_shift(id).await?;
    Ok(Json(assignments))
}

/// GET /api/shifts/{id}/candidates — directory workers eligible for the shift
#[utoipa::path(
    get,
    path = "/api/shifts/{id}/candidates",
    params(("id" = Uuid, Path, description = "Shift id")),
    responses(
        (status = 200, description = "Workers matching the shift's specialty without a live assignment on it", body = Vec<Worker>),
        (status = 404, description = "Shift not found")
    ),
    tag = "shifts"
)]
pub async fn get_candidates(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Worker>>> {
    let candidates = state.engine.candidates_for_shift(id).await?;
    Ok(Json(candidates))
}
