use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::models::AssignmentStatus;

/// Typed failure taxonomy of the staffing engine. All variants are
/// expected, recoverable-by-caller conditions; the caller decides whether
/// and how to retry.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("shift {0} not found")]
    ShiftNotFound(Uuid),

    #[error("assignment {0} not found")]
    AssignmentNotFound(Uuid),

    #[error("worker {worker_id} already has an active assignment on shift {shift_id}")]
    AlreadyAssigned { worker_id: i32, shift_id: Uuid },

    #[error("shift {shift_id} is {status} and no longer accepts assignments")]
    ShiftNotOpen {
        shift_id: Uuid,
        status: crate::models::ShiftStatus,
    },

    #[error("shift {shift_id} is already fully staffed ({required} workers)")]
    CapacityExceeded { shift_id: Uuid, required: i32 },

    #[error("worker {worker_id} was assigned to shift {shift_id} by a concurrent operation")]
    DuplicateAssignment { worker_id: i32, shift_id: Uuid },

    #[error("worker {worker_id} is already confirmed on overlapping shift {conflicting_shift_id}")]
    SchedulingConflict {
        worker_id: i32,
        conflicting_shift_id: Uuid,
        conflicting_assignment_id: Uuid,
    },

    #[error("invalid assignment transition: {from} -> {to}")]
    InvalidTransition {
        from: AssignmentStatus,
        to: AssignmentStatus,
    },

    #[error("shift status cannot be set to {to} through an edit")]
    InvalidShiftTransition {
        from: crate::models::ShiftStatus,
        to: crate::models::ShiftStatus,
    },

    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
}

impl EngineError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::ShiftNotFound(_) | EngineError::AssignmentNotFound(_) => "not_found",
            EngineError::AlreadyAssigned { .. } => "already_assigned",
            EngineError::ShiftNotOpen { .. } => "shift_not_open",
            EngineError::CapacityExceeded { .. } => "capacity_exceeded",
            EngineError::DuplicateAssignment { .. } => "duplicate_assignment",
            EngineError::SchedulingConflict { .. } => "scheduling_conflict",
            EngineError::InvalidTransition { .. } => "invalid_transition",
            EngineError::InvalidShiftTransition { .. } => "invalid_shift_transition",
            EngineError::PersistenceFailure(_) => "persistence_failure",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    Engine(#[from] EngineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Engine(e) => engine_error_response(e),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Translate each engine failure kind into a specific, actionable message
/// rather than a generic error.
fn engine_error_response(e: EngineError) -> (StatusCode, String) {
    match &e {
        EngineError::ShiftNotFound(_) | EngineError::AssignmentNotFound(_) => {
            (StatusCode::NOT_FOUND, e.to_string())
        }
        EngineError::AlreadyAssigned { .. } | EngineError::DuplicateAssignment { .. } => (
            StatusCode::CONFLICT,
            "This worker is already assigned to this shift".to_string(),
        ),
        EngineError::ShiftNotOpen { status, .. } => (
            StatusCode::CONFLICT,
            format!("This shift is {} and can no longer be staffed", status),
        ),
        EngineError::CapacityExceeded { .. } => (
            StatusCode::CONFLICT,
            "This shift is already fully staffed".to_string(),
        ),
        EngineError::SchedulingConflict { .. } => (
            StatusCode::CONFLICT,
            "This worker is already confirmed on an overlapping shift".to_string(),
        ),
        EngineError::InvalidTransition { from, to } => (
            StatusCode::CONFLICT,
            format!("Assignment cannot move from {} to {}", from, to),
        ),
        EngineError::InvalidShiftTransition { to, .. } => (
            StatusCode::CONFLICT,
            format!("A shift cannot be marked {} through an edit", to),
        ),
        EngineError::PersistenceFailure(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "The change could not be saved, please retry".to_string(),
        ),
    }
}

pub type AppResult<T> = Result<T, AppError>;
pub type EngineResult<T> = Result<T, EngineError>;
