use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Input DTO for a worker requesting a shift
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestAssignmentInput {
    pub worker_id: i32,
    pub shift_id: Uuid,
    pub notes: Option<String>,
}

/// Input DTO for the administrative fast path: create and confirm in one
/// step, without a prior pending request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DirectConfirmInput {
    pub worker_id: i32,
    pub shift_id: Uuid,
    pub actor: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmAssignmentInput {
    pub actor: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeclineAssignmentInput {
    pub actor: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkNoShowInput {
    pub actor: String,
}

/// Every accepted assignment mutation returns the updated record together
/// with the shift's fresh staffing snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentOutcome {
    pub assignment: super::Assignment,
    pub staffing: super::StaffingSnapshot,
}
