use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    upstream: String,
    version: &'static str,
}

/// Liveness only; the upstream is not probed.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        upstream: state.config.gc2_host.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
