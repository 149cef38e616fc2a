use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use rotacore_axum::directory::{StaticDirectory, WorkerDirectory};
use rotacore_axum::models::Worker;
use rotacore_axum::store::MemoryStore;
use rotacore_axum::{handlers, startup, AppConfig, AppState, StaffingEngine};

async fn test_router() -> axum::Router {
    let store = Arc::new(MemoryStore::new());
    let directory = Arc::new(StaticDirectory::new());
    directory
        .seed(vec![
            Worker {
                id: 1,
                full_name: "Asha Naidoo".to_string(),
                specialty: "ICU".to_string(),
                rating: Some(4.8),
            },
            Worker {
                id: 2,
                full_name: "Ben Oduya".to_string(),
                specialty: "ICU".to_string(),
                rating: Some(4.2),
            },
        ])
        .await;

    let directory: Arc<dyn WorkerDirectory> = directory;
    let engine = Arc::new(StaffingEngine::new(store, directory.clone()));

    let state = Arc::new(AppState {
        engine,
        directory,
        config: AppConfig {
            database_url: None,
            bind_addr: "127.0.0.1:0".to_string(),
            allowed_origin: "http://localhost:3000".to_string(),
        },
        metrics: Arc::new(handlers::setup_metrics_recorder()),
    });

    startup::build_router(state)
}

async fn send_json(router: &axum::Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_get(router: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// End-to-end pass over the operation surface. Single test because the
/// Prometheus recorder installs a process-global handle.
#[tokio::test]
async fn staffing_flow_over_http() {
    let router = test_router().await;

    let (status, body) = send_get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "rotacore");

    // The OpenAPI document is served next to the docs page.
    let (status, docs) = send_get(&router, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(docs["paths"]["/api/shifts"].is_object());

    // Invalid capacity is rejected up front.
    let (status, _) = send_json(
        &router,
        "POST",
        "/api/shifts",
        json!({
            "facility_id": 1,
            "specialty": "ICU",
            "date": "2026-03-02",
            "start": "08:00:00",
            "end": "16:00:00",
            "required_workers": 0
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Create a two-slot shift.
    let (status, shift) = send_json(
        &router,
        "POST",
        "/api/shifts",
        json!({
            "facility_id": 1,
            "specialty": "ICU",
            "date": "2026-03-02",
            "start": "08:00:00",
            "end": "16:00:00",
            "required_workers": 2
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let shift_id = shift["id"].as_str().unwrap().to_string();
    assert_eq!(shift["status"], "open");

    // Worker 1 requests, then an admin confirms the request.
    let (status, outcome) = send_json(
        &router,
        "POST",
        "/api/assignments",
        json!({ "worker_id": 1, "shift_id": shift_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["assignment"]["status"], "pending");
    let assignment_id = outcome["assignment"]["id"].as_str().unwrap().to_string();

    let (status, outcome) = send_json(
        &router,
        "POST",
        &format!("/api/assignments/{}/confirm", assignment_id),
        json!({ "actor": "charge nurse" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["staffing"]["confirmed"], 1);

    // Worker 2 via the administrative fast path fills the shift.
    let (status, outcome) = send_json(
        &router,
        "POST",
        "/api/assignments/confirm",
        json!({ "worker_id": 2, "shift_id": shift_id, "actor": "charge nurse" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["staffing"]["confirmed"], 2);
    assert_eq!(outcome["staffing"]["status"], "filled");

    // A third confirm attempt maps CapacityExceeded to 409 with an
    // actionable message.
    let (status, body) = send_json(
        &router,
        "POST",
        "/api/assignments/confirm",
        json!({ "worker_id": 3, "shift_id": shift_id, "actor": "charge nurse" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "This shift is already fully staffed");

    // The snapshot read agrees with the mutation responses.
    let (status, staffing) = send_get(&router, &format!("/api/shifts/{}/staffing", shift_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(staffing["required"], 2);
    assert_eq!(staffing["confirmed"], 2);
    assert_eq!(staffing["workers"].as_array().unwrap().len(), 2);

    // Unknown ids surface as 404.
    let (status, _) = send_get(
        &router,
        "/api/shifts/00000000-0000-0000-0000-000000000000/staffing",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Cancellation over HTTP returns the cascaded batch.
    let (status, response) = send_json(
        &router,
        "POST",
        &format!("/api/shifts/{}/cancel", shift_id),
        json!({ "reason": "unit closed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["declined_assignments"].as_array().unwrap().len(), 2);
    assert_eq!(response["staffing"]["status"], "cancelled");
}
