use crate::api::handlers::monitor::ApiState;
use crate::api::types::HealthResponse;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<ApiState>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    };

    (StatusCode::OK, Json(response))
}
