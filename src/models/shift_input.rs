use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Input DTO for creating a new shift
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateShiftInput {
    pub facility_id: i32,
    pub specialty: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub required_workers: i32,
    /// Create as draft instead of open (defaults to open).
    #[serde(default)]
    pub draft: bool,
}

/// Input DTO for the administrative shift edit (capacity and time window)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateShiftInput {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub required_workers: Option<i32>,
    pub status: Option<super::ShiftStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancelShiftInput {
    pub reason: String,
}

/// Response after a shift cancellation: the cascaded assignment ids plus
/// the final snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancelShiftResponse {
    pub shift_id: Uuid,
    pub declined_assignments: Vec<Uuid>,
    pub staffing: super::StaffingSnapshot,
}
