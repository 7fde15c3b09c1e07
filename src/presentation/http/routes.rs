use super::{
    handlers::{health, process, upload},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

const PROCESS_BASE: &str = "/api/extensions/fkgupload/api/process";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Upload
        .route("/api/extension/fkgupload", post(upload::upload_photo))
        // Process passthrough
        .route(
            &format!("{}/{{type_code}}", PROCESS_BASE),
            post(process::create_attachment).put(process::update_attachment),
        )
        .route(
            &format!("{}/{{type_code}}/{{id}}", PROCESS_BASE),
            get(process::list_processed).delete(process::delete_attachment),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
