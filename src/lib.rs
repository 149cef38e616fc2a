pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod startup;
pub mod store;

use std::sync::Arc;

pub use config::AppConfig;
pub use engine::StaffingEngine;
pub use error::{AppError, AppResult, EngineError, EngineResult};
pub use handlers::MetricsState;

pub struct AppState {
    pub engine: Arc<StaffingEngine>,
    pub directory: Arc<dyn directory::WorkerDirectory>,
    pub config: AppConfig,
    pub metrics: Arc<MetricsState>,
}
