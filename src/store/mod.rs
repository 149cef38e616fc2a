use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Assignment, Shift};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// The shift row moved underneath the writer. The engine re-reads
    /// authoritative state before retrying; it never trusts a cached count.
    #[error("version conflict on shift {0}")]
    VersionConflict(Uuid),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Persistence collaborator for shifts and assignments.
///
/// `commit_staffing` is the atomic conditional-update primitive everything
/// else leans on: the shift's derived counts/status and the assignment
/// writes land together, or not at all, guarded by the shift's version
/// counter. Implementations must never apply either side partially.
#[async_trait]
pub trait StaffingStore: Send + Sync {
    async fn insert_shift(&self, shift: &Shift) -> Result<(), StoreError>;

    async fn get_shift(&self, id: Uuid) -> Result<Option<Shift>, StoreError>;

    async fn shifts_for_date(&self, date: NaiveDate) -> Result<Vec<Shift>, StoreError>;

    async fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>, StoreError>;

    /// All assignments for a shift, terminal ones included (history reads).
    async fn assignments_for_shift(&self, shift_id: Uuid) -> Result<Vec<Assignment>, StoreError>;

    /// All assignments held by a worker across shifts.
    async fn assignments_for_worker(&self, worker_id: i32) -> Result<Vec<Assignment>, StoreError>;

    /// Atomically persist the shift (with its version bumped by one) and the
    /// given assignment upserts, iff the stored version still equals
    /// `shift.version`. Returns the stored shift on success and
    /// `VersionConflict` if another writer got there first.
    async fn commit_staffing(
        &self,
        shift: &Shift,
        assignments: &[Assignment],
    ) -> Result<Shift, StoreError>;
}
