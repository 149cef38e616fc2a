use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

/// Per-shift mutual exclusion. Every capacity-affecting write for a shift
/// runs inside that shift's lock, so two concurrent confirms cannot both
/// observe `confirmed < required` and proceed. Operations on different
/// shifts take different locks and never contend.
#[derive(Default)]
pub struct ShiftLocks {
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl ShiftLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for a shift, created on first use. Entries for shifts
    /// that can still be mutated are retained; terminal shifts are released
    /// so the table stays bounded by the live shift population.
    pub fn for_shift(&self, shift_id: Uuid) -> Arc<AsyncMutex<()>> {
        let mut table = self.locks.lock().expect("shift lock table poisoned");
        table
            .entry(shift_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Drop the entry for a shift that takes no further mutations. A waiter
    /// holding the old handle keeps it; late arrivals get a fresh lock and
    /// re-validate against the stored status, which rejects them anyway.
    pub fn release(&self, shift_id: Uuid) {
        let mut table = self.locks.lock().expect("shift lock table poisoned");
        table.remove(&shift_id);
    }
}
