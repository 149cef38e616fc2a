use async_trait::async_trait;
use moka::future::Cache;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::models::Worker;

/// Read-only worker directory collaborator: worker id to identity,
/// qualification and rating. Never consulted for invariant checks, only
/// when presenting candidates and staffing snapshots.
#[async_trait]
pub trait WorkerDirectory: Send + Sync {
    async fn get_worker(&self, id: i32) -> Option<Worker>;

    async fn list_workers(&self) -> Vec<Worker>;
}

/// In-process directory seeded at startup (or by tests). The real
/// deployment would back this with the HR system's worker table.
#[derive(Default)]
pub struct StaticDirectory {
    workers: RwLock<HashMap<i32, Worker>>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, workers: Vec<Worker>) {
        let mut map = self.workers.write().await;
        for worker in workers {
            map.insert(worker.id, worker);
        }
    }
}

#[async_trait]
impl WorkerDirectory for StaticDirectory {
    async fn get_worker(&self, id: i32) -> Option<Worker> {
        self.workers.read().await.get(&id).cloned()
    }

    async fn list_workers(&self) -> Vec<Worker> {
        let mut workers: Vec<Worker> = self.workers.read().await.values().cloned().collect();
        workers.sort_by_key(|w| w.id);
        workers
    }
}

/// Directory reads against the HR system's worker table, used alongside
/// the Postgres store.
pub struct PgDirectory {
    pool: sqlx::PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct WorkerRow {
    id: i32,
    full_name: String,
    specialty: String,
    rating: Option<f32>,
}

impl PgDirectory {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

impl From<WorkerRow> for Worker {
    fn from(row: WorkerRow) -> Self {
        Worker {
            id: row.id,
            full_name: row.full_name,
            specialty: row.specialty,
            rating: row.rating,
        }
    }
}

#[async_trait]
impl WorkerDirectory for PgDirectory {
    async fn get_worker(&self, id: i32) -> Option<Worker> {
        let row = sqlx::query_as::<_, WorkerRow>(
            r#"SELECT id, full_name, specialty, rating FROM "Workers" WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match row {
            Ok(row) => row.map(Worker::from),
            Err(e) => {
                tracing::error!(error = %e, worker_id = id, "worker directory lookup failed");
                None
            }
        }
    }

    async fn list_workers(&self) -> Vec<Worker> {
        let rows = sqlx::query_as::<_, WorkerRow>(
            r#"SELECT id, full_name, specialty, rating FROM "Workers" ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await;

        match rows {
            Ok(rows) => rows.into_iter().map(Worker::from).collect(),
            Err(e) => {
                tracing::error!(error = %e, "worker directory listing failed");
                Vec::new()
            }
        }
    }
}

/// Read-through cache in front of a directory, for snapshot enrichment on
/// hot shifts. Lookups are cached for five minutes; directory data changes
/// rarely and staleness here never affects invariant checks.
pub struct CachedDirectory {
    inner: Arc<dyn WorkerDirectory>,
    cache: Cache<i32, Worker>,
}

impl CachedDirectory {
    pub fn new(inner: Arc<dyn WorkerDirectory>) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(300))
            .max_capacity(10_000)
            .build();
        Self { inner, cache }
    }
}

#[async_trait]
impl WorkerDirectory for CachedDirectory {
    async fn get_worker(&self, id: i32) -> Option<Worker> {
        if let Some(worker) = self.cache.get(&id).await {
            return Some(worker);
        }
        let worker = self.inner.get_worker(id).await?;
        self.cache.insert(id, worker.clone()).await;
        Some(worker)
    }

    async fn list_workers(&self) -> Vec<Worker> {
        self.inner.list_workers().await
    }
}
