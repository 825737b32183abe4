use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::{health_check, monitor, ApiState};
use crate::api::types::ApiConfig;
use crate::pool::facade::PoolFacade;
use crate::utils::error::{PoolscopeError, Result};

/// Build the monitor router over a facade.
///
/// Split out of `start_monitor_server` so tests (and embedding
/// applications) can drive the router without binding a socket. Every
/// response carries cache-disabling headers - the page reflects live pool
/// state and must never be served stale.
pub fn build_router(facade: Arc<dyn PoolFacade>) -> Router {
    let state = ApiState {
        facade,
        start_time: Instant::now(),
    };

    Router::new()
        .route("/monitor", get(monitor).post(monitor))
        .route("/health", get(health_check))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the monitor HTTP server.
pub async fn start_monitor_server(config: ApiConfig, facade: Arc<dyn PoolFacade>) -> Result<()> {
    let app = build_router(facade);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.bind_port)
        .parse()
        .map_err(|e| PoolscopeError::Config(format!("Invalid bind address: {}", e)))?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Monitor listening on http://{}/monitor", addr);

    axum::serve(listener, app)
        .await
        .map_err(PoolscopeError::Io)?;

    Ok(())
}
