use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StaffingStore, StoreError};
use crate::models::{Assignment, Shift};

#[derive(Default)]
struct Inner {
    shifts: HashMap<Uuid, Shift>,
    assignments: HashMap<Uuid, Assignment>,
}

/// In-process store. The default backend when no `DATABASE_URL` is
/// configured, and the backend the test suite runs against. The
/// conditional commit happens under a single write guard, so the version
/// check and both writes are indivisible.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StaffingStore for MemoryStore {
    async fn insert_shift(&self, shift: &Shift) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.shifts.insert(shift.id, shift.clone());
        Ok(())
    }

    async fn get_shift(&self, id: Uuid) -> Result<Option<Shift>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.shifts.get(&id).cloned())
    }

    async fn shifts_for_date(&self, date: NaiveDate) -> Result<Vec<Shift>, StoreError> {
        let inner = self.inner.read().await;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|s| s.date == date)
            .cloned()
            .collect();
        shifts.sort_by_key(|s| (s.start, s.id));
        Ok(shifts)
    }

    async fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.assignments.get(&id).cloned())
    }

    async fn assignments_for_shift(&self, shift_id: Uuid) -> Result<Vec<Assignment>, StoreError> {
        let inner = self.inner.read().await;
        let mut records: Vec<Assignment> = inner
            .assignments
            .values()
            .filter(|a| a.shift_id == shift_id)
            .cloned()
            .collect();
        records.sort_by_key(|a| (a.requested_at, a.id));
        Ok(records)
    }

    async fn assignments_for_worker(&self, worker_id: i32) -> Result<Vec<Assignment>, StoreError> {
        let inner = self.inner.read().await;
        let mut records: Vec<Assignment> = inner
            .assignments
            .values()
            .filter(|a| a.worker_id == worker_id)
            .cloned()
            .collect();
        records.sort_by_key(|a| (a.requested_at, a.id));
        Ok(records)
    }

    async fn commit_staffing(
        &self,
        shift: &Shift,
        assignments: &[Assignment],
    ) -> Result<Shift, StoreError> {
        let mut inner = self.inner.write().await;

        let stored = inner.shifts.get(&shift.id).ok_or(StoreError::NotFound)?;
        if stored.version != shift.version {
            return Err(StoreError::VersionConflict(shift.id));
        }

        let mut committed = shift.clone();
        committed.version += 1;
        inner.shifts.insert(committed.id, committed.clone());

        for assignment in assignments {
            inner.assignments.insert(assignment.id, assignment.clone());
        }

        Ok(committed)
    }
}
