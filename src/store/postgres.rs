use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use std::time::Duration;
use uuid::Uuid;

use super::{StaffingStore, StoreError};
use crate::models::{Assignment, Shift};

#[derive(Debug, FromRow)]
struct ShiftRow {
    id: Uuid,
    facility_id: i32,
    specialty: String,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    required_workers: i32,
    status: String,
    confirmed_count: i32,
    pending_count: i32,
    version: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ShiftRow> for Shift {
    type Error = StoreError;

    fn try_from(row: ShiftRow) -> Result<Self, Self::Error> {
        Ok(Shift {
            id: row.id,
            facility_id: row.facility_id,
            specialty: row.specialty,
            date: row.date,
            start: row.start,
            end: row.end,
            required_workers: row.required_workers,
            status: row.status.parse().map_err(StoreError::Backend)?,
            confirmed_count: row.confirmed_count,
            pending_count: row.pending_count,
            version: row.version,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    id: Uuid,
    worker_id: i32,
    shift_id: Uuid,
    status: String,
    requested_at: DateTime<Utc>,
    decided_at: Option<DateTime<Utc>>,
    decided_by: Option<String>,
    decline_reason: Option<String>,
    notes: Option<String>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = StoreError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Assignment {
            id: row.id,
            worker_id: row.worker_id,
            shift_id: row.shift_id,
            status: row.status.parse().map_err(StoreError::Backend)?,
            requested_at: row.requested_at,
            decided_at: row.decided_at,
            decided_by: row.decided_by,
            decline_reason: row.decline_reason,
            notes: row.notes,
        })
    }
}

const SHIFT_COLUMNS: &str = r#"
    id,
    facility_id,
    specialty,
    date,
    start,
    "end" AS "end",
    required_workers,
    status,
    confirmed_count,
    pending_count,
    version,
    created_at
"#;

const ASSIGNMENT_COLUMNS: &str = r#"
    id,
    worker_id,
    shift_id,
    status,
    requested_at,
    decided_at,
    decided_by,
    decline_reason,
    notes
"#;

pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(25)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await
}

/// Postgres-backed store. The conditional commit wraps the shift update and
/// the assignment upserts in one transaction, guarded by
/// `WHERE version = $expected` on the shift row.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffingStore for PgStore {
    async fn insert_shift(&self, shift: &Shift) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO "Shifts" (
                id, facility_id, specialty, date, start, "end",
                required_workers, status, confirmed_count, pending_count,
                version, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(shift.id)
        .bind(shift.facility_id)
        .bind(&shift.specialty)
        .bind(shift.date)
        .bind(shift.start)
        .bind(shift.end)
        .bind(shift.required_workers)
        .bind(shift.status.to_string())
        .bind(shift.confirmed_count)
        .bind(shift.pending_count)
        .bind(shift.version)
        .bind(shift.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_shift(&self, id: Uuid) -> Result<Option<Shift>, StoreError> {
        let sql = format!(r#"SELECT {} FROM "Shifts" WHERE id = $1"#, SHIFT_COLUMNS);

        let row = sqlx::query_as::<_, ShiftRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Shift::try_from).transpose()
    }

    async fn shifts_for_date(&self, date: NaiveDate) -> Result<Vec<Shift>, StoreError> {
        let sql = format!(
            r#"SELECT {} FROM "Shifts" WHERE date = $1 ORDER BY start, id"#,
            SHIFT_COLUMNS
        );

        let rows = sqlx::query_as::<_, ShiftRow>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Shift::try_from).collect()
    }

    async fn get_assignment(&self, id: Uuid) -> Result<Option<Assignment>, StoreError> {
        let sql = format!(
            r#"SELECT {} FROM "Assignments" WHERE id = $1"#,
            ASSIGNMENT_COLUMNS
        );

        let row = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Assignment::try_from).transpose()
    }

    async fn assignments_for_shift(&self, shift_id: Uuid) -> Result<Vec<Assignment>, StoreError> {
        let sql = format!(
            r#"SELECT {} FROM "Assignments" WHERE shift_id = $1 ORDER BY requested_at, id"#,
            ASSIGNMENT_COLUMNS
        );

        let rows = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(shift_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Assignment::try_from).collect()
    }

    async fn assignments_for_worker(&self, worker_id: i32) -> Result<Vec<Assignment>, StoreError> {
        let sql = format!(
            r#"SELECT {} FROM "Assignments" WHERE worker_id = $1 ORDER BY requested_at, id"#,
            ASSIGNMENT_COLUMNS
        );

        let rows = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(worker_id)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Assignment::try_from).collect()
    }

    async fn commit_staffing(
        &self,
        shift: &Shift,
        assignments: &[Assignment],
    ) -> Result<Shift, StoreError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE "Shifts"
            SET date = $1,
                start = $2,
                "end" = $3,
                required_workers = $4,
                status = $5,
                confirmed_count = $6,
                pending_count = $7,
                version = version + 1
            WHERE id = $8 AND version = $9
            "#,
        )
        .bind(shift.date)
        .bind(shift.start)
        .bind(shift.end)
        .bind(shift.required_workers)
        .bind(shift.status.to_string())
        .bind(shift.confirmed_count)
        .bind(shift.pending_count)
        .bind(shift.id)
        .bind(shift.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::VersionConflict(shift.id));
        }

        for assignment in assignments {
            sqlx::query(
                r#"
                INSERT INTO "Assignments" (
                    id, worker_id, shift_id, status, requested_at,
                    decided_at, decided_by, decline_reason, notes
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (id) DO UPDATE SET
                    status = EXCLUDED.status,
                    decided_at = EXCLUDED.decided_at,
                    decided_by = EXCLUDED.decided_by,
                    decline_reason = EXCLUDED.decline_reason,
                    notes = EXCLUDED.notes
                "#,
            )
            .bind(assignment.id)
            .bind(assignment.worker_id)
            .bind(assignment.shift_id)
            .bind(assignment.status.to_string())
            .bind(assignment.requested_at)
            .bind(assignment.decided_at)
            .bind(&assignment.decided_by)
            .bind(&assignment.decline_reason)
            .bind(&assignment.notes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let mut committed = shift.clone();
        committed.version += 1;
        Ok(committed)
    }
}
