use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Directory record for a worker. Identity, qualification and rating are
/// owned by the worker directory collaborator; the engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Worker {
    pub id: i32,
    pub full_name: String,
    pub specialty: String,
    pub rating: Option<f32>,
}
