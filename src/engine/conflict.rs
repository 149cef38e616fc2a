use chrono::NaiveDateTime;

use crate::error::EngineResult;
use crate::models::{Assignment, AssignmentStatus, Shift};
use crate::store::StaffingStore;

/// Half-open interval overlap: [startA, endA) intersects [startB, endB)
/// iff `startA < endB && startB < endA`. Back-to-back shifts (one ending
/// exactly when the other starts) do not conflict.
pub fn windows_overlap(
    a: (NaiveDateTime, NaiveDateTime),
    b: (NaiveDateTime, NaiveDateTime),
) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Find a `confirmed` assignment of `worker_id` on another shift whose time
/// window intersects the candidate shift's. Read-only; consulted by the
/// enforcer before a confirmation commits, never mutates anything.
pub async fn find_conflict(
    store: &dyn StaffingStore,
    worker_id: i32,
    candidate: &Shift,
) -> EngineResult<Option<Assignment>> {
    let candidate_window = candidate.window();

    let assignments = store
        .assignments_for_worker(worker_id)
        .await
        .map_err(crate::engine::persistence_error)?;

    for assignment in assignments {
        if assignment.status != AssignmentStatus::Confirmed || assignment.shift_id == candidate.id {
            continue;
        }

        let other = store
            .get_shift(assignment.shift_id)
            .await
            .map_err(crate::engine::persistence_error)?;

        // A confirmed assignment on a shift the store no longer knows about
        // cannot block anything.
        let Some(other) = other else { continue };

        if windows_overlap(candidate_window, other.window()) {
            return Ok(Some(assignment));
        }
    }

    Ok(None)
}
