use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::{get, post, put},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

use crate::{handlers, middleware, openapi::ApiDoc};

pub fn build_router(state: Arc<crate::AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .allowed_origin
                .parse::<HeaderValue>()
                .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000")),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let shift_routes = Router::new()
        .route("/", get(handlers::shifts_handler::get_shifts_for_date))
        .route("/", post(handlers::shifts_handler::create_shift))
        .route("/{id}", get(handlers::shifts_handler::get_shift))
        .route("/{id}", put(handlers::shifts_handler::update_shift))
        .route("/{id}/staffing", get(handlers::shifts_handler::get_staffing))
        .route("/{id}/cancel", post(handlers::shifts_handler::cancel_shift))
        .route(
            "/{id}/assignments",
            get(handlers::shifts_handler::get_shift_assignments),
        )
        .route(
            "/{id}/candidates",
            get(handlers::shifts_handler::get_candidates),
        )
        .route("/{id}/events", get(handlers::events_handler::shift_events));

    let assignment_routes = Router::new()
        .route("/", post(handlers::assignments_handler::request_assignment))
        .route(
            "/confirm",
            post(handlers::assignments_handler::direct_confirm),
        )
        .route("/{id}", get(handlers::assignments_handler::get_assignment))
        .route(
            "/{id}/confirm",
            post(handlers::assignments_handler::confirm_assignment),
        )
        .route(
            "/{id}/decline",
            post(handlers::assignments_handler::decline_assignment),
        )
        .route(
            "/{id}/complete",
            post(handlers::assignments_handler::complete_assignment),
        )
        .route(
            "/{id}/no-show",
            post(handlers::assignments_handler::mark_no_show),
        );

    let worker_routes = Router::new()
        .route("/", get(handlers::workers_handler::get_workers))
        .route("/{id}", get(handlers::workers_handler::get_worker))
        .route(
            "/{id}/assignments",
            get(handlers::workers_handler::get_worker_assignments),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .nest("/api/shifts", shift_routes)
        .nest("/api/assignments", assignment_routes)
        .nest("/api/workers", worker_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api-docs", get(api_docs))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .with_state(state)
}

async fn api_docs() -> Html<&'static str> {
    Html(r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Rotacore API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: '/api-docs/openapi.json',
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
    "#)
}
