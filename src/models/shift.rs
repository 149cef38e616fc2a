use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a shift. `Filled` and `Open` are derived from the
/// confirmed count and flip automatically as assignments are confirmed or
/// removed; the remaining states are set administratively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Draft,
    Open,
    Filled,
    InProgress,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    /// Whether the shift can still take assignment requests or confirmations.
    pub fn accepts_assignments(&self) -> bool {
        !matches!(self, ShiftStatus::Cancelled | ShiftStatus::Completed)
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShiftStatus::Draft => "draft",
            ShiftStatus::Open => "open",
            ShiftStatus::Filled => "filled",
            ShiftStatus::InProgress => "in_progress",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for ShiftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ShiftStatus::Draft),
            "open" => Ok(ShiftStatus::Open),
            "filled" => Ok(ShiftStatus::Filled),
            "in_progress" => Ok(ShiftStatus::InProgress),
            "completed" => Ok(ShiftStatus::Completed),
            "cancelled" => Ok(ShiftStatus::Cancelled),
            other => Err(format!("unknown shift status: {}", other)),
        }
    }
}

/// A unit of staffing demand: a time window at a facility requiring
/// `required_workers` workers of a given specialty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Shift {
    pub id: Uuid,
    pub facility_id: i32,
    pub specialty: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub required_workers: i32,
    pub status: ShiftStatus,
    /// Derived counts, kept transactionally consistent with the ledger.
    pub confirmed_count: i32,
    pub pending_count: i32,
    /// Monotonic version used as the compare-and-swap guard for commits.
    #[serde(skip_serializing)]
    #[serde(default)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl Shift {
    /// The shift's [start, end) window as concrete datetimes. A shift whose
    /// end time is not after its start time runs into the next day.
    pub fn window(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.date.and_time(self.start);
        let end = if self.end > self.start {
            self.date.and_time(self.end)
        } else {
            self.date.and_time(self.end) + Duration::days(1)
        };
        (start, end)
    }
}
