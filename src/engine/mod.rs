use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use uuid::Uuid;

use crate::directory::WorkerDirectory;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AssignedWorkerSummary, Assignment, AssignmentStatus, AssignmentOutcome, CancelShiftResponse,
    CreateShiftInput, DirectConfirmInput, RequestAssignmentInput, Shift, ShiftStatus,
    StaffingEventKind, StaffingSnapshot, UpdateShiftInput, Worker,
};
use crate::store::{StaffingStore, StoreError};

pub mod bus;
pub mod conflict;
pub mod locks;

pub use bus::ChangeBus;
pub use locks::ShiftLocks;

pub(crate) fn persistence_error(e: StoreError) -> EngineError {
    EngineError::PersistenceFailure(e.to_string())
}

fn record_op<T>(op: &'static str, result: &EngineResult<T>) {
    let outcome = match result {
        Ok(_) => "accepted",
        Err(e) => e.kind(),
    };
    counter!("staffing_operations_total", "op" => op, "outcome" => outcome).increment(1);
}

/// The staffing engine: assignment ledger, invariant enforcer and change
/// publisher in one component. Every mutation follows the same discipline:
/// take the shift's lock, re-read authoritative state, validate against
/// that state (never against what the caller saw), commit through the
/// store's conditional primitive, then publish exactly one event.
///
/// A failed commit is retried once from a fresh re-read; a second failure
/// surfaces as `PersistenceFailure` with nothing applied.
pub struct StaffingEngine {
    store: Arc<dyn StaffingStore>,
    directory: Arc<dyn WorkerDirectory>,
    locks: ShiftLocks,
    bus: ChangeBus,
}

impl StaffingEngine {
    pub fn new(store: Arc<dyn StaffingStore>, directory: Arc<dyn WorkerDirectory>) -> Self {
        Self {
            store,
            directory,
            locks: ShiftLocks::new(),
            bus: ChangeBus::new(),
        }
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    // ---- shift registry reads ----

    pub async fn get_shift(&self, id: Uuid) -> EngineResult<Shift> {
        self.store
            .get_shift(id)
            .await
            .map_err(persistence_error)?
            .ok_or(EngineError::ShiftNotFound(id))
    }

    pub async fn shifts_for_date(&self, date: chrono::NaiveDate) -> EngineResult<Vec<Shift>> {
        self.store
            .shifts_for_date(date)
            .await
            .map_err(persistence_error)
    }

    /// Read-optimized staffing projection. Reads go straight to the store,
    /// so a caller that just committed a mutation sees it reflected here.
    pub async fn get_staffing(&self, shift_id: Uuid) -> EngineResult<StaffingSnapshot> {
        let shift = self.get_shift(shift_id).await?;
        self.snapshot(&shift).await
    }

    /// Full assignment history for a shift, terminal records included.
    pub async fn assignments_for_shift(&self, shift_id: Uuid) -> EngineResult<Vec<Assignment>> {
        // NotFound on an unknown shift rather than an empty history.
        self.get_shift(shift_id).await?;
        self.store
            .assignments_for_shift(shift_id)
            .await
            .map_err(persistence_error)
    }

    pub async fn get_assignment(&self, id: Uuid) -> EngineResult<Assignment> {
        self.fresh_assignment(id).await
    }

    pub async fn assignments_for_worker(&self, worker_id: i32) -> EngineResult<Vec<Assignment>> {
        self.store
            .assignments_for_worker(worker_id)
            .await
            .map_err(persistence_error)
    }

    /// Directory workers matching the shift's specialty that do not already
    /// hold a live assignment on it. Presentation only; confirmation still
    /// goes through the enforcer.
    pub async fn candidates_for_shift(&self, shift_id: Uuid) -> EngineResult<Vec<Worker>> {
        let shift = self.get_shift(shift_id).await?;
        let assignments = self
            .store
            .assignments_for_shift(shift_id)
            .await
            .map_err(persistence_error)?;

        let taken: Vec<i32> = assignments
            .iter()
            .filter(|a| !a.status.is_terminal())
            .map(|a| a.worker_id)
            .collect();

        let candidates = self
            .directory
            .list_workers()
            .await
            .into_iter()
            .filter(|w| w.specialty == shift.specialty && !taken.contains(&w.id))
            .collect();

        Ok(candidates)
    }

    // ---- shift registry writes ----

    pub async fn create_shift(&self, input: CreateShiftInput) -> EngineResult<Shift> {
        let shift = Shift {
            id: Uuid::new_v4(),
            facility_id: input.facility_id,
            specialty: input.specialty,
            date: input.date,
            start: input.start,
            end: input.end,
            required_workers: input.required_workers,
            status: if input.draft {
                ShiftStatus::Draft
            } else {
                ShiftStatus::Open
            },
            confirmed_count: 0,
            pending_count: 0,
            version: 0,
            created_at: Utc::now(),
        };

        self.store
            .insert_shift(&shift)
            .await
            .map_err(persistence_error)?;

        tracing::info!(shift_id = %shift.id, required = shift.required_workers, "shift created");
        Ok(shift)
    }

    /// Administrative edit of capacity and time window. Reducing capacity
    /// below the current confirmed count is rejected; workers are only ever
    /// removed through explicit declines.
    pub async fn update_shift(&self, shift_id: Uuid, input: UpdateShiftInput) -> EngineResult<Shift> {
        let lock = self.locks.for_shift(shift_id);
        let _guard = lock.lock().await;

        let result = match self.try_update_shift(shift_id, &input).await {
            Err(EngineError::PersistenceFailure(e)) => {
                tracing::warn!(shift_id = %shift_id, error = %e, "shift update commit failed, retrying once");
                self.try_update_shift(shift_id, &input).await
            }
            other => other,
        };
        record_op("update_shift", &result);
        result
    }

    async fn try_update_shift(&self, shift_id: Uuid, input: &UpdateShiftInput) -> EngineResult<Shift> {
        let mut shift = self.get_shift(shift_id).await?;

        if !shift.status.accepts_assignments() {
            return Err(EngineError::ShiftNotOpen {
                shift_id,
                status: shift.status,
            });
        }

        if let Some(date) = input.date {
            shift.date = date;
        }
        if let Some(start) = input.start {
            shift.start = start;
        }
        if let Some(end) = input.end {
            shift.end = end;
        }
        if let Some(required) = input.required_workers {
            if required < shift.confirmed_count {
                return Err(EngineError::CapacityExceeded {
                    shift_id,
                    required,
                });
            }
            shift.required_workers = required;
        }

        if let Some(status) = input.status {
            // Terminal statuses are reached through their own operations,
            // which cascade over the ledger; an edit must not skip that.
            if !status.accepts_assignments() {
                return Err(EngineError::InvalidShiftTransition {
                    from: shift.status,
                    to: status,
                });
            }
            shift.status = status;
        }
        recompute_fill_status(&mut shift);

        let committed = self.commit(&shift, &[]).await?;
        self.publish(&committed, StaffingEventKind::CapacityChanged)
            .await?;

        tracing::info!(
            shift_id = %shift_id,
            required = committed.required_workers,
            status = %committed.status,
            "shift updated"
        );
        Ok(committed)
    }

    /// Cancel the shift and cascade every non-terminal assignment to
    /// `declined` with reason "shift cancelled". One commit, one event.
    pub async fn cancel_shift(&self, shift_id: Uuid, reason: &str) -> EngineResult<CancelShiftResponse> {
        let lock = self.locks.for_shift(shift_id);
        let _guard = lock.lock().await;

        let result = match self.try_cancel_shift(shift_id, reason).await {
            Err(EngineError::PersistenceFailure(e)) => {
                tracing::warn!(shift_id = %shift_id, error = %e, "cancel commit failed, retrying once");
                self.try_cancel_shift(shift_id, reason).await
            }
            other => other,
        };
        record_op("cancel_shift", &result);
        result
    }

    async fn try_cancel_shift(&self, shift_id: Uuid, reason: &str) -> EngineResult<CancelShiftResponse> {
        let mut shift = self.get_shift(shift_id).await?;

        if !shift.status.accepts_assignments() {
            return Err(EngineError::ShiftNotOpen {
                shift_id,
                status: shift.status,
            });
        }

        let assignments = self
            .store
            .assignments_for_shift(shift_id)
            .await
            .map_err(persistence_error)?;

        let now = Utc::now();
        let mut cascaded = Vec::new();
        for mut assignment in assignments {
            if assignment.status.is_terminal() {
                continue;
            }
            assignment.status = AssignmentStatus::Declined;
            assignment.decided_at = Some(now);
            assignment.decided_by = Some("system".to_string());
            assignment.decline_reason = Some("shift cancelled".to_string());
            cascaded.push(assignment);
        }

        shift.status = ShiftStatus::Cancelled;
        shift.confirmed_count = 0;
        shift.pending_count = 0;

        let committed = self.commit(&shift, &cascaded).await?;

        tracing::info!(
            shift_id = %shift_id,
            cascaded = cascaded.len(),
            reason,
            "shift cancelled"
        );

        let snapshot = self
            .publish(&committed, StaffingEventKind::CapacityChanged)
            .await?;

        // Nothing mutates a cancelled shift again; drop its lock and
        // channel entries so the tables stay bounded.
        self.bus.close(shift_id);
        self.locks.release(shift_id);

        Ok(CancelShiftResponse {
            shift_id,
            declined_assignments: cascaded.iter().map(|a| a.id).collect(),
            staffing: snapshot,
        })
    }

    // ---- assignment ledger operations ----

    /// A worker asks to be staffed on a shift. Creates a `pending` record;
    /// consumes no capacity. A pending request on a shift that later fills
    /// stays pending and is rejected only if someone tries to confirm it.
    pub async fn request_assignment(
        &self,
        input: RequestAssignmentInput,
    ) -> EngineResult<AssignmentOutcome> {
        let lock = self.locks.for_shift(input.shift_id);
        let _guard = lock.lock().await;

        let result = match self.try_request(&input).await {
            Err(EngineError::PersistenceFailure(e)) => {
                tracing::warn!(shift_id = %input.shift_id, error = %e, "request commit failed, retrying once");
                self.try_request(&input).await
            }
            other => other,
        };
        record_op("request", &result);
        result
    }

    async fn try_request(&self, input: &RequestAssignmentInput) -> EngineResult<AssignmentOutcome> {
        let mut shift = self.get_shift(input.shift_id).await?;

        if !shift.status.accepts_assignments() {
            return Err(EngineError::ShiftNotOpen {
                shift_id: shift.id,
                status: shift.status,
            });
        }

        self.ensure_not_already_assigned(input.worker_id, shift.id, None)
            .await?;

        let assignment = Assignment {
            id: Uuid::new_v4(),
            worker_id: input.worker_id,
            shift_id: shift.id,
            status: AssignmentStatus::Pending,
            requested_at: Utc::now(),
            decided_at: None,
            decided_by: None,
            decline_reason: None,
            notes: input.notes.clone(),
        };

        shift.pending_count += 1;

        let committed = self.commit(&shift, std::slice::from_ref(&assignment)).await?;
        let snapshot = self
            .publish(&committed, StaffingEventKind::AssignmentChanged)
            .await?;

        tracing::info!(
            shift_id = %shift.id,
            worker_id = input.worker_id,
            assignment_id = %assignment.id,
            "assignment requested"
        );

        Ok(AssignmentOutcome {
            assignment,
            staffing: snapshot,
        })
    }

    /// Confirm a pending request. The capacity, duplicate and scheduling
    /// checks are evaluated against the state read under the shift lock,
    /// immediately before the commit.
    pub async fn confirm_assignment(
        &self,
        assignment_id: Uuid,
        actor: &str,
    ) -> EngineResult<AssignmentOutcome> {
        let shift_id = self.shift_of(assignment_id).await?;
        let lock = self.locks.for_shift(shift_id);
        let _guard = lock.lock().await;

        let result = match self.try_confirm(assignment_id, actor).await {
            Err(EngineError::PersistenceFailure(e)) => {
                tracing::warn!(assignment_id = %assignment_id, error = %e, "confirm commit failed, retrying once");
                self.try_confirm(assignment_id, actor).await
            }
            other => other,
        };
        record_op("confirm", &result);
        result
    }

    async fn try_confirm(&self, assignment_id: Uuid, actor: &str) -> EngineResult<AssignmentOutcome> {
        let mut assignment = self.fresh_assignment(assignment_id).await?;
        let mut shift = self.get_shift(assignment.shift_id).await?;

        if !shift.status.accepts_assignments() {
            return Err(EngineError::ShiftNotOpen {
                shift_id: shift.id,
                status: shift.status,
            });
        }

        self.check_transition(&assignment, AssignmentStatus::Confirmed)?;
        self.enforce_confirmation(&mut shift, assignment.worker_id, Some(assignment.id))
            .await?;

        assignment.status = AssignmentStatus::Confirmed;
        assignment.decided_at = Some(Utc::now());
        assignment.decided_by = Some(actor.to_string());

        shift.pending_count -= 1;

        let committed = self.commit(&shift, std::slice::from_ref(&assignment)).await?;
        let snapshot = self
            .publish(&committed, StaffingEventKind::CapacityChanged)
            .await?;

        tracing::info!(
            shift_id = %shift.id,
            worker_id = assignment.worker_id,
            assignment_id = %assignment.id,
            confirmed = committed.confirmed_count,
            required = committed.required_workers,
            actor,
            "assignment confirmed"
        );

        Ok(AssignmentOutcome {
            assignment,
            staffing: snapshot,
        })
    }

    /// Administrative fast path: create and confirm in one step, without a
    /// prior pending request. Same enforcer checks as a regular confirm.
    pub async fn direct_confirm(&self, input: DirectConfirmInput) -> EngineResult<AssignmentOutcome> {
        let lock = self.locks.for_shift(input.shift_id);
        let _guard = lock.lock().await;

        let result = match self.try_direct_confirm(&input).await {
            Err(EngineError::PersistenceFailure(e)) => {
                tracing::warn!(shift_id = %input.shift_id, error = %e, "direct confirm commit failed, retrying once");
                self.try_direct_confirm(&input).await
            }
            other => other,
        };
        record_op("direct_confirm", &result);
        result
    }

    async fn try_direct_confirm(&self, input: &DirectConfirmInput) -> EngineResult<AssignmentOutcome> {
        let mut shift = self.get_shift(input.shift_id).await?;

        if !shift.status.accepts_assignments() {
            return Err(EngineError::ShiftNotOpen {
                shift_id: shift.id,
                status: shift.status,
            });
        }

        self.ensure_not_already_assigned(input.worker_id, shift.id, None)
            .await?;
        self.enforce_confirmation(&mut shift, input.worker_id, None)
            .await?;

        let now = Utc::now();
        let assignment = Assignment {
            id: Uuid::new_v4(),
            worker_id: input.worker_id,
            shift_id: shift.id,
            status: AssignmentStatus::Confirmed,
            requested_at: now,
            decided_at: Some(now),
            decided_by: Some(input.actor.clone()),
            decline_reason: None,
            notes: input.notes.clone(),
        };

        let committed = self.commit(&shift, std::slice::from_ref(&assignment)).await?;
        let snapshot = self
            .publish(&committed, StaffingEventKind::CapacityChanged)
            .await?;

        tracing::info!(
            shift_id = %shift.id,
            worker_id = input.worker_id,
            assignment_id = %assignment.id,
            actor = %input.actor,
            "assignment created and confirmed directly"
        );

        Ok(AssignmentOutcome {
            assignment,
            staffing: snapshot,
        })
    }

    /// Decline a pending request, or remove a confirmed worker. Removing a
    /// confirmed worker frees capacity and may flip the shift back to open.
    pub async fn decline_assignment(
        &self,
        assignment_id: Uuid,
        actor: &str,
        reason: &str,
    ) -> EngineResult<AssignmentOutcome> {
        let shift_id = self.shift_of(assignment_id).await?;
        let lock = self.locks.for_shift(shift_id);
        let _guard = lock.lock().await;

        let result = match self.try_decline(assignment_id, actor, reason).await {
            Err(EngineError::PersistenceFailure(e)) => {
                tracing::warn!(assignment_id = %assignment_id, error = %e, "decline commit failed, retrying once");
                self.try_decline(assignment_id, actor, reason).await
            }
            other => other,
        };
        record_op("decline", &result);
        result
    }

    async fn try_decline(
        &self,
        assignment_id: Uuid,
        actor: &str,
        reason: &str,
    ) -> EngineResult<AssignmentOutcome> {
        let mut assignment = self.fresh_assignment(assignment_id).await?;
        let mut shift = self.get_shift(assignment.shift_id).await?;

        self.check_transition(&assignment, AssignmentStatus::Declined)?;

        let was_confirmed = assignment.status == AssignmentStatus::Confirmed;

        assignment.status = AssignmentStatus::Declined;
        assignment.decided_at = Some(Utc::now());
        assignment.decided_by = Some(actor.to_string());
        assignment.decline_reason = Some(reason.to_string());

        let kind = if was_confirmed {
            shift.confirmed_count -= 1;
            recompute_fill_status(&mut shift);
            StaffingEventKind::CapacityChanged
        } else {
            shift.pending_count -= 1;
            StaffingEventKind::AssignmentChanged
        };

        let committed = self.commit(&shift, std::slice::from_ref(&assignment)).await?;
        let snapshot = self.publish(&committed, kind).await?;

        tracing::info!(
            shift_id = %shift.id,
            worker_id = assignment.worker_id,
            assignment_id = %assignment.id,
            was_confirmed,
            actor,
            reason,
            "assignment declined"
        );

        Ok(AssignmentOutcome {
            assignment,
            staffing: snapshot,
        })
    }

    /// Record that a confirmed worker worked the shift. No capacity effect;
    /// the record becomes terminal.
    pub async fn complete_assignment(&self, assignment_id: Uuid) -> EngineResult<AssignmentOutcome> {
        let shift_id = self.shift_of(assignment_id).await?;
        let lock = self.locks.for_shift(shift_id);
        let _guard = lock.lock().await;

        let result = match self.try_complete(assignment_id).await {
            Err(EngineError::PersistenceFailure(e)) => {
                tracing::warn!(assignment_id = %assignment_id, error = %e, "complete commit failed, retrying once");
                self.try_complete(assignment_id).await
            }
            other => other,
        };
        record_op("complete", &result);
        result
    }

    async fn try_complete(&self, assignment_id: Uuid) -> EngineResult<AssignmentOutcome> {
        let mut assignment = self.fresh_assignment(assignment_id).await?;
        let shift = self.get_shift(assignment.shift_id).await?;

        self.check_transition(&assignment, AssignmentStatus::Completed)?;

        assignment.status = AssignmentStatus::Completed;
        assignment.decided_at = Some(Utc::now());

        let committed = self.commit(&shift, std::slice::from_ref(&assignment)).await?;
        let snapshot = self
            .publish(&committed, StaffingEventKind::AssignmentChanged)
            .await?;

        Ok(AssignmentOutcome {
            assignment,
            staffing: snapshot,
        })
    }

    /// Mark a confirmed worker as a no-show. Frees the slot so the shift
    /// can be re-filled; the terminal record is the flag downstream
    /// reliability scoring picks up.
    pub async fn mark_no_show(&self, assignment_id: Uuid, actor: &str) -> EngineResult<AssignmentOutcome> {
        let shift_id = self.shift_of(assignment_id).await?;
        let lock = self.locks.for_shift(shift_id);
        let _guard = lock.lock().await;

        let result = match self.try_mark_no_show(assignment_id, actor).await {
            Err(EngineError::PersistenceFailure(e)) => {
                tracing::warn!(assignment_id = %assignment_id, error = %e, "no-show commit failed, retrying once");
                self.try_mark_no_show(assignment_id, actor).await
            }
            other => other,
        };
        record_op("no_show", &result);
        result
    }

    async fn try_mark_no_show(&self, assignment_id: Uuid, actor: &str) -> EngineResult<AssignmentOutcome> {
        let mut assignment = self.fresh_assignment(assignment_id).await?;
        let mut shift = self.get_shift(assignment.shift_id).await?;

        self.check_transition(&assignment, AssignmentStatus::NoShow)?;

        assignment.status = AssignmentStatus::NoShow;
        assignment.decided_at = Some(Utc::now());
        assignment.decided_by = Some(actor.to_string());

        shift.confirmed_count -= 1;
        recompute_fill_status(&mut shift);

        let committed = self.commit(&shift, std::slice::from_ref(&assignment)).await?;
        let snapshot = self
            .publish(&committed, StaffingEventKind::CapacityChanged)
            .await?;

        tracing::warn!(
            shift_id = %shift.id,
            worker_id = assignment.worker_id,
            assignment_id = %assignment.id,
            actor,
            "worker marked as no-show, slot freed"
        );

        Ok(AssignmentOutcome {
            assignment,
            staffing: snapshot,
        })
    }

    // ---- enforcer internals ----

    /// The three commit-time rules of the invariant enforcer: capacity,
    /// duplicate pairing, scheduling conflict. On success the shift's
    /// confirmed count is incremented and its fill status recomputed; the
    /// caller commits both together with the assignment write.
    async fn enforce_confirmation(
        &self,
        shift: &mut Shift,
        worker_id: i32,
        confirming: Option<Uuid>,
    ) -> EngineResult<()> {
        if shift.confirmed_count + 1 > shift.required_workers {
            return Err(EngineError::CapacityExceeded {
                shift_id: shift.id,
                required: shift.required_workers,
            });
        }

        // Duplicate check runs against the ledger, not the registry: any
        // other live record for the pair blocks the confirmation.
        let assignments = self
            .store
            .assignments_for_shift(shift.id)
            .await
            .map_err(persistence_error)?;
        let duplicate = assignments.iter().any(|a| {
            a.worker_id == worker_id && !a.status.is_terminal() && Some(a.id) != confirming
        });
        if duplicate {
            return Err(EngineError::DuplicateAssignment {
                worker_id,
                shift_id: shift.id,
            });
        }

        if let Some(conflicting) = conflict::find_conflict(self.store.as_ref(), worker_id, shift).await? {
            return Err(EngineError::SchedulingConflict {
                worker_id,
                conflicting_shift_id: conflicting.shift_id,
                conflicting_assignment_id: conflicting.id,
            });
        }

        shift.confirmed_count += 1;
        recompute_fill_status(shift);
        Ok(())
    }

    fn check_transition(&self, assignment: &Assignment, to: AssignmentStatus) -> EngineResult<()> {
        if assignment.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition {
                from: assignment.status,
                to,
            })
        }
    }

    async fn ensure_not_already_assigned(
        &self,
        worker_id: i32,
        shift_id: Uuid,
        ignoring: Option<Uuid>,
    ) -> EngineResult<()> {
        let assignments = self
            .store
            .assignments_for_shift(shift_id)
            .await
            .map_err(persistence_error)?;

        let held = assignments.iter().any(|a| {
            a.worker_id == worker_id && !a.status.is_terminal() && Some(a.id) != ignoring
        });
        if held {
            return Err(EngineError::AlreadyAssigned { worker_id, shift_id });
        }
        Ok(())
    }

    // ---- plumbing ----

    async fn shift_of(&self, assignment_id: Uuid) -> EngineResult<Uuid> {
        let assignment = self
            .store
            .get_assignment(assignment_id)
            .await
            .map_err(persistence_error)?
            .ok_or(EngineError::AssignmentNotFound(assignment_id))?;
        Ok(assignment.shift_id)
    }

    async fn fresh_assignment(&self, assignment_id: Uuid) -> EngineResult<Assignment> {
        self.store
            .get_assignment(assignment_id)
            .await
            .map_err(persistence_error)?
            .ok_or(EngineError::AssignmentNotFound(assignment_id))
    }

    async fn commit(&self, shift: &Shift, assignments: &[Assignment]) -> EngineResult<Shift> {
        debug_assert!(shift.confirmed_count <= shift.required_workers || shift.status == ShiftStatus::Cancelled);
        self.store
            .commit_staffing(shift, assignments)
            .await
            .map_err(persistence_error)
    }

    /// Build the post-commit snapshot and publish it while still holding
    /// the shift lock, so bus subscribers see events in commit order.
    async fn publish(&self, shift: &Shift, kind: StaffingEventKind) -> EngineResult<StaffingSnapshot> {
        let snapshot = self.snapshot(shift).await?;
        self.bus.publish(shift.id, kind, snapshot.clone());
        Ok(snapshot)
    }

    async fn snapshot(&self, shift: &Shift) -> EngineResult<StaffingSnapshot> {
        let assignments = self
            .store
            .assignments_for_shift(shift.id)
            .await
            .map_err(persistence_error)?;

        let mut workers = Vec::new();
        for assignment in &assignments {
            if assignment.status.is_terminal() {
                continue;
            }
            let summary = match self.directory.get_worker(assignment.worker_id).await {
                Some(worker) => AssignedWorkerSummary {
                    worker_id: worker.id,
                    name: worker.full_name,
                    specialty: worker.specialty,
                    rating: worker.rating,
                    assignment_id: assignment.id,
                    assignment_status: assignment.status,
                },
                // Directory outages degrade the label, never the snapshot.
                None => AssignedWorkerSummary {
                    worker_id: assignment.worker_id,
                    name: format!("worker {}", assignment.worker_id),
                    specialty: String::new(),
                    rating: None,
                    assignment_id: assignment.id,
                    assignment_status: assignment.status,
                },
            };
            workers.push(summary);
        }

        Ok(StaffingSnapshot {
            shift_id: shift.id,
            status: shift.status,
            required: shift.required_workers,
            confirmed: shift.confirmed_count,
            pending: shift.pending_count,
            workers,
        })
    }
}

/// Derived status rule: `filled` exactly when the confirmed count reaches
/// the requirement, reverting to `open` when it drops below. Administrative
/// states are left alone.
fn recompute_fill_status(shift: &mut Shift) {
    if matches!(shift.status, ShiftStatus::Open | ShiftStatus::Filled) {
        shift.status = if shift.confirmed_count >= shift.required_workers {
            ShiftStatus::Filled
        } else {
            ShiftStatus::Open
        };
    }
}
