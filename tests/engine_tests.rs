mod common;

use common::{direct_confirm, engine_with_workers, request, shift_input, MONDAY};
use rotacore_axum::models::{AssignmentStatus, ShiftStatus, UpdateShiftInput};
use rotacore_axum::EngineError;

#[tokio::test]
async fn request_then_confirm_fills_shift_step_by_step() {
    let engine = engine_with_workers(&[1, 2]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 2))
        .await
        .unwrap();

    // Worker 1 requests: pending, no capacity consumed.
    let outcome = engine.request_assignment(request(1, shift.id)).await.unwrap();
    assert_eq!(outcome.assignment.status, AssignmentStatus::Pending);
    assert_eq!(outcome.staffing.confirmed, 0);
    assert_eq!(outcome.staffing.pending, 1);

    // Admin confirms worker 1: staffing 1/2, still open.
    let outcome = engine
        .confirm_assignment(outcome.assignment.id, "admin")
        .await
        .unwrap();
    assert_eq!(outcome.assignment.status, AssignmentStatus::Confirmed);
    assert_eq!(outcome.staffing.confirmed, 1);
    assert_eq!(outcome.staffing.pending, 0);
    assert_eq!(outcome.staffing.status, ShiftStatus::Open);

    // Worker 2 via the fast path: staffing 2/2, shift filled.
    let outcome = engine.direct_confirm(direct_confirm(2, shift.id)).await.unwrap();
    assert_eq!(outcome.staffing.confirmed, 2);
    assert_eq!(outcome.staffing.status, ShiftStatus::Filled);
}

#[tokio::test]
async fn confirm_on_full_shift_is_rejected_with_capacity_exceeded() {
    let engine = engine_with_workers(&[1, 2, 3]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 2))
        .await
        .unwrap();

    engine.direct_confirm(direct_confirm(1, shift.id)).await.unwrap();
    engine.direct_confirm(direct_confirm(2, shift.id)).await.unwrap();

    // Worker 3 may still request while the shift is filled.
    let pending = engine.request_assignment(request(3, shift.id)).await.unwrap();
    assert_eq!(pending.assignment.status, AssignmentStatus::Pending);

    // Confirming the stale pending request must fail.
    let err = engine
        .confirm_assignment(pending.assignment.id, "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::CapacityExceeded { .. }));

    // Staffing unchanged, request still pending and visible.
    let staffing = engine.get_staffing(shift.id).await.unwrap();
    assert_eq!(staffing.confirmed, 2);
    assert_eq!(staffing.pending, 1);
    assert_eq!(staffing.status, ShiftStatus::Filled);

    let record = engine.get_assignment(pending.assignment.id).await.unwrap();
    assert_eq!(record.status, AssignmentStatus::Pending);
}

#[tokio::test]
async fn removing_a_confirmed_worker_reopens_the_shift() {
    let engine = engine_with_workers(&[1, 2]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 2))
        .await
        .unwrap();

    let a = engine.direct_confirm(direct_confirm(1, shift.id)).await.unwrap();
    engine.direct_confirm(direct_confirm(2, shift.id)).await.unwrap();
    assert_eq!(
        engine.get_staffing(shift.id).await.unwrap().status,
        ShiftStatus::Filled
    );

    let outcome = engine
        .decline_assignment(a.assignment.id, "admin", "removed from roster")
        .await
        .unwrap();
    assert_eq!(outcome.assignment.status, AssignmentStatus::Declined);
    assert_eq!(outcome.staffing.confirmed, 1);
    assert_eq!(outcome.staffing.status, ShiftStatus::Open);
}

#[tokio::test]
async fn overlapping_confirmed_shifts_conflict() {
    let engine = engine_with_workers(&[1]).await;
    let x = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 1))
        .await
        .unwrap();
    let y = engine
        .create_shift(shift_input(MONDAY, (14, 0), (22, 0), 1))
        .await
        .unwrap();

    engine.direct_confirm(direct_confirm(1, x.id)).await.unwrap();

    let err = engine.direct_confirm(direct_confirm(1, y.id)).await.unwrap_err();
    match err {
        EngineError::SchedulingConflict {
            worker_id,
            conflicting_shift_id,
            ..
        } => {
            assert_eq!(worker_id, 1);
            assert_eq!(conflicting_shift_id, x.id);
        }
        other => panic!("expected SchedulingConflict, got {:?}", other),
    }

    // The rejected confirm left nothing behind.
    let staffing = engine.get_staffing(y.id).await.unwrap();
    assert_eq!(staffing.confirmed, 0);
    assert_eq!(staffing.pending, 0);
}

#[tokio::test]
async fn back_to_back_shifts_do_not_conflict() {
    let engine = engine_with_workers(&[1]).await;
    let first = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 1))
        .await
        .unwrap();
    let second = engine
        .create_shift(shift_input(MONDAY, (16, 0), (22, 0), 1))
        .await
        .unwrap();

    engine.direct_confirm(direct_confirm(1, first.id)).await.unwrap();
    let outcome = engine.direct_confirm(direct_confirm(1, second.id)).await.unwrap();
    assert_eq!(outcome.assignment.status, AssignmentStatus::Confirmed);
}

#[tokio::test]
async fn duplicate_request_for_same_pair_is_rejected() {
    let engine = engine_with_workers(&[1]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 2))
        .await
        .unwrap();

    engine.request_assignment(request(1, shift.id)).await.unwrap();
    let err = engine.request_assignment(request(1, shift.id)).await.unwrap_err();
    assert!(matches!(err, EngineError::AlreadyAssigned { .. }));

    // A terminal record does not block a new request.
    let history = engine.assignments_for_shift(shift.id).await.unwrap();
    engine
        .decline_assignment(history[0].id, "worker", "changed my mind")
        .await
        .unwrap();
    engine.request_assignment(request(1, shift.id)).await.unwrap();
}

#[tokio::test]
async fn requests_on_cancelled_or_completed_shifts_are_rejected() {
    let engine = engine_with_workers(&[1]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 1))
        .await
        .unwrap();

    engine.cancel_shift(shift.id, "low census").await.unwrap();

    let err = engine.request_assignment(request(1, shift.id)).await.unwrap_err();
    match err {
        EngineError::ShiftNotOpen { status, .. } => assert_eq!(status, ShiftStatus::Cancelled),
        other => panic!("expected ShiftNotOpen, got {:?}", other),
    }
}

#[tokio::test]
async fn illegal_transitions_are_rejected_and_leave_the_record_unchanged() {
    let engine = engine_with_workers(&[1]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 1))
        .await
        .unwrap();

    let pending = engine.request_assignment(request(1, shift.id)).await.unwrap();

    // pending -> completed and pending -> no_show are not in the table.
    let err = engine.complete_assignment(pending.assignment.id).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidTransition {
            from: AssignmentStatus::Pending,
            to: AssignmentStatus::Completed,
        }
    ));
    let err = engine
        .mark_no_show(pending.assignment.id, "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));

    let record = engine.get_assignment(pending.assignment.id).await.unwrap();
    assert_eq!(record.status, AssignmentStatus::Pending);
    assert!(record.decided_at.is_none());

    // Rejection is idempotent: declining a declined record fails the same
    // way and changes nothing.
    engine
        .decline_assignment(pending.assignment.id, "admin", "no longer needed")
        .await
        .unwrap();
    let err = engine
        .decline_assignment(pending.assignment.id, "admin", "again")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));
    let record = engine.get_assignment(pending.assignment.id).await.unwrap();
    assert_eq!(record.decline_reason.as_deref(), Some("no longer needed"));
}

#[tokio::test]
async fn no_show_frees_the_slot_for_refill() {
    let engine = engine_with_workers(&[1, 2]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 1))
        .await
        .unwrap();

    let a = engine.direct_confirm(direct_confirm(1, shift.id)).await.unwrap();
    assert_eq!(a.staffing.status, ShiftStatus::Filled);

    let outcome = engine.mark_no_show(a.assignment.id, "admin").await.unwrap();
    assert_eq!(outcome.assignment.status, AssignmentStatus::NoShow);
    assert_eq!(outcome.staffing.confirmed, 0);
    assert_eq!(outcome.staffing.status, ShiftStatus::Open);

    // The freed slot can be taken by someone else.
    let refill = engine.direct_confirm(direct_confirm(2, shift.id)).await.unwrap();
    assert_eq!(refill.staffing.confirmed, 1);
    assert_eq!(refill.staffing.status, ShiftStatus::Filled);
}

#[tokio::test]
async fn completion_is_terminal_and_has_no_capacity_effect() {
    let engine = engine_with_workers(&[1]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 1))
        .await
        .unwrap();

    let a = engine.direct_confirm(direct_confirm(1, shift.id)).await.unwrap();
    let outcome = engine.complete_assignment(a.assignment.id).await.unwrap();
    assert_eq!(outcome.assignment.status, AssignmentStatus::Completed);
    assert_eq!(outcome.staffing.confirmed, 1);

    let err = engine
        .decline_assignment(a.assignment.id, "admin", "too late")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTransition { .. }));
}

#[tokio::test]
async fn cancellation_cascades_all_live_assignments() {
    let engine = engine_with_workers(&[1, 2]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 2))
        .await
        .unwrap();

    // Worker 1 pending, worker 2 confirmed.
    let pending = engine.request_assignment(request(1, shift.id)).await.unwrap();
    let confirmed = engine.direct_confirm(direct_confirm(2, shift.id)).await.unwrap();

    let response = engine.cancel_shift(shift.id, "facility closed").await.unwrap();
    assert_eq!(response.declined_assignments.len(), 2);
    assert_eq!(response.staffing.status, ShiftStatus::Cancelled);
    assert_eq!(response.staffing.confirmed, 0);
    assert_eq!(response.staffing.pending, 0);

    for id in [pending.assignment.id, confirmed.assignment.id] {
        let record = engine.get_assignment(id).await.unwrap();
        assert_eq!(record.status, AssignmentStatus::Declined);
        assert_eq!(record.decline_reason.as_deref(), Some("shift cancelled"));
    }

    // Cancelling twice is a ShiftNotOpen rejection, not a second cascade.
    let err = engine.cancel_shift(shift.id, "again").await.unwrap_err();
    assert!(matches!(err, EngineError::ShiftNotOpen { .. }));
}

#[tokio::test]
async fn capacity_cannot_be_edited_below_confirmed_count() {
    let engine = engine_with_workers(&[1, 2]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 2))
        .await
        .unwrap();

    engine.direct_confirm(direct_confirm(1, shift.id)).await.unwrap();
    engine.direct_confirm(direct_confirm(2, shift.id)).await.unwrap();

    let err = engine
        .update_shift(
            shift.id,
            UpdateShiftInput {
                date: None,
                start: None,
                end: None,
                required_workers: Some(1),
                status: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::CapacityExceeded { required: 1, .. }));

    // Raising capacity reopens a filled shift.
    let updated = engine
        .update_shift(
            shift.id,
            UpdateShiftInput {
                date: None,
                start: None,
                end: None,
                required_workers: Some(3),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.required_workers, 3);
    assert_eq!(updated.status, ShiftStatus::Open);
}

#[tokio::test]
async fn shift_edits_cannot_bypass_the_cancel_cascade() {
    let engine = engine_with_workers(&[1]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 1))
        .await
        .unwrap();
    let a = engine.direct_confirm(direct_confirm(1, shift.id)).await.unwrap();

    // Setting a terminal status through the edit endpoint would leave the
    // confirmed assignment live on a dead shift; both are rejected.
    for status in [ShiftStatus::Cancelled, ShiftStatus::Completed] {
        let err = engine
            .update_shift(
                shift.id,
                UpdateShiftInput {
                    date: None,
                    start: None,
                    end: None,
                    required_workers: None,
                    status: Some(status),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidShiftTransition { to, .. } if to == status));
    }

    let staffing = engine.get_staffing(shift.id).await.unwrap();
    assert_eq!(staffing.status, ShiftStatus::Filled);
    assert_eq!(staffing.confirmed, 1);
    let record = engine.get_assignment(a.assignment.id).await.unwrap();
    assert_eq!(record.status, AssignmentStatus::Confirmed);

    // The dedicated cancel operation is the path that cascades.
    let response = engine.cancel_shift(shift.id, "unit closed").await.unwrap();
    assert_eq!(response.declined_assignments.len(), 1);
    let record = engine.get_assignment(a.assignment.id).await.unwrap();
    assert_eq!(record.status, AssignmentStatus::Declined);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let engine = engine_with_workers(&[]).await;
    let missing = uuid::Uuid::new_v4();

    assert!(matches!(
        engine.get_staffing(missing).await.unwrap_err(),
        EngineError::ShiftNotFound(_)
    ));
    assert!(matches!(
        engine.confirm_assignment(missing, "admin").await.unwrap_err(),
        EngineError::AssignmentNotFound(_)
    ));
}

#[tokio::test]
async fn candidates_exclude_already_assigned_workers() {
    let engine = engine_with_workers(&[1, 2, 3]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 2))
        .await
        .unwrap();

    engine.direct_confirm(direct_confirm(1, shift.id)).await.unwrap();

    let candidates = engine.candidates_for_shift(shift.id).await.unwrap();
    let ids: Vec<i32> = candidates.iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn snapshot_lists_live_workers_with_directory_details() {
    let engine = engine_with_workers(&[7]).await;
    let shift = engine
        .create_shift(shift_input(MONDAY, (8, 0), (16, 0), 1))
        .await
        .unwrap();

    engine.direct_confirm(direct_confirm(7, shift.id)).await.unwrap();

    let staffing = engine.get_staffing(shift.id).await.unwrap();
    assert_eq!(staffing.workers.len(), 1);
    assert_eq!(staffing.workers[0].worker_id, 7);
    assert_eq!(staffing.workers[0].name, "Worker 7");
    assert_eq!(staffing.workers[0].assignment_status, AssignmentStatus::Confirmed);
}
