use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{AssignmentStatus, ShiftStatus};

/// One line of a staffing snapshot: a worker with a live (non-terminal)
/// assignment on the shift, enriched from the worker directory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignedWorkerSummary {
    pub worker_id: i32,
    pub name: String,
    pub specialty: String,
    pub rating: Option<f32>,
    pub assignment_id: Uuid,
    pub assignment_status: AssignmentStatus,
}

/// Read-optimized projection of a shift's staffing state. Always reflects
/// the ledger's last accepted mutation for the shift; observers treat it as
/// a full replacement, so replaying the same snapshot is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffingSnapshot {
    pub shift_id: Uuid,
    pub status: ShiftStatus,
    pub required: i32,
    pub confirmed: i32,
    pub pending: i32,
    pub workers: Vec<AssignedWorkerSummary>,
}

/// What changed in an accepted mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StaffingEventKind {
    /// An assignment record changed without affecting capacity
    /// (request created, completion recorded).
    AssignmentChanged,
    /// The confirmed count or shift status moved (confirm, removal,
    /// no-show, cancellation, capacity edit).
    CapacityChanged,
}

/// Event published on the change bus after every accepted mutation.
/// `seq` increases in commit order per shift; sequences for different
/// shifts are independent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffingEvent {
    pub shift_id: Uuid,
    pub seq: u64,
    pub kind: StaffingEventKind,
    pub snapshot: StaffingSnapshot,
}
