use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rotacore_axum::directory::{CachedDirectory, PgDirectory, StaticDirectory, WorkerDirectory};
use rotacore_axum::store::{MemoryStore, PgStore, StaffingStore};
use rotacore_axum::{handlers, startup, AppConfig, AppState, StaffingEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with conditional JSON/text output
    let use_json = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,rotacore_axum=debug,tower_http=debug".into());

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Human-readable for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    // Pick the persistence backend: Postgres when configured, in-process
    // otherwise (local development).
    let (store, directory): (Arc<dyn StaffingStore>, Arc<dyn WorkerDirectory>) =
        match &config.database_url {
            Some(url) => {
                let pool = rotacore_axum::store::postgres::connect_pool(url)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to create database pool: {}", e);
                        e
                    })?;
                tracing::info!("Database pool created successfully");
                (
                    Arc::new(PgStore::new(pool.clone())),
                    Arc::new(PgDirectory::new(pool)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, running on the in-process store");
                (Arc::new(MemoryStore::new()), Arc::new(StaticDirectory::new()))
            }
        };

    let directory: Arc<dyn WorkerDirectory> = Arc::new(CachedDirectory::new(directory));

    // Initialize metrics recorder
    let metrics_state = Arc::new(handlers::setup_metrics_recorder());
    tracing::info!("Metrics recorder initialized");

    let engine = Arc::new(StaffingEngine::new(store, directory.clone()));

    let state = Arc::new(AppState {
        engine,
        directory,
        config: config.clone(),
        metrics: metrics_state,
    });

    let app = startup::build_router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
