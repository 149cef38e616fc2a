use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of an assignment. `Declined`, `Completed` and `NoShow`
/// are terminal: records reaching them are retained for history but never
/// transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Confirmed,
    Declined,
    Completed,
    NoShow,
}

impl AssignmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AssignmentStatus::Declined | AssignmentStatus::Completed | AssignmentStatus::NoShow
        )
    }

    /// The closed transition table. Anything not listed here is a bug in the
    /// caller, not a new valid state.
    pub fn can_transition_to(&self, next: AssignmentStatus) -> bool {
        use AssignmentStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Declined)
                | (Confirmed, Completed)
                | (Confirmed, Declined)
                | (Confirmed, NoShow)
        )
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Confirmed => "confirmed",
            AssignmentStatus::Declined => "declined",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::NoShow => "no_show",
        };
        f.write_str(s)
    }
}

impl FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "confirmed" => Ok(AssignmentStatus::Confirmed),
            "declined" => Ok(AssignmentStatus::Declined),
            "completed" => Ok(AssignmentStatus::Completed),
            "no_show" => Ok(AssignmentStatus::NoShow),
            other => Err(format!("unknown assignment status: {}", other)),
        }
    }
}

/// One worker's relationship to one shift. At most one non-terminal record
/// may exist per (worker, shift) pair; terminal records are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub worker_id: i32,
    pub shift_id: Uuid,
    pub status: AssignmentStatus,
    pub requested_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    /// Who made the last decision (admin name or "worker"), for history.
    pub decided_by: Option<String>,
    pub decline_reason: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use AssignmentStatus::*;

    #[test]
    fn terminal_states_have_no_outgoing_transitions() {
        let all = [Pending, Confirmed, Declined, Completed, NoShow];
        for from in [Declined, Completed, NoShow] {
            for to in all {
                assert!(!from.can_transition_to(to), "{} -> {} must be illegal", from, to);
            }
        }
    }

    #[test]
    fn pending_cannot_skip_to_completed_or_no_show() {
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(NoShow));
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Declined));
    }

    #[test]
    fn confirmed_transitions() {
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Declined));
        assert!(Confirmed.can_transition_to(NoShow));
        assert!(!Confirmed.can_transition_to(Pending));
    }
}
