use crate::api::types::{Action, MonitorQuery};
use crate::chart::{render_bar_chart, ChartSpec};
use crate::monitor::view::list_view;
use crate::monitor::{render_view, resolve_view, MonitorView};
use crate::pool::facade::PoolFacade;
use crate::utils::error::PoolscopeError;
use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

/// Shared state behind the monitor endpoint.
#[derive(Clone)]
pub struct ApiState {
    pub facade: Arc<dyn PoolFacade>,
    pub start_time: Instant,
}

/// GET/POST /monitor - the monitoring endpoint.
///
/// `action=chart` serves the PNG a previously rendered page linked to;
/// `list`/`stats` (the default) serve a complete HTML document. Chart
/// parameters are validated before drawing, so a failure is always a clean
/// client error instead of partial image bytes.
pub async fn monitor(
    State(state): State<ApiState>,
    uri: Uri,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = MonitorQuery::decode(raw.as_deref().unwrap_or(""));

    let action = match Action::from_param(query.action.as_deref()) {
        Ok(action) => action,
        Err(e) => {
            warn!("{}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match action {
        Action::Chart => chart_response(&query),
        Action::List => {
            report_response(&state, uri.path(), |facade| {
                list_view(query.alias.as_deref(), facade)
            })
        }
        Action::Stats => {
            report_response(&state, uri.path(), |facade| {
                resolve_view(query.alias.as_deref(), facade)
            })
        }
    }
}

fn chart_response(query: &MonitorQuery) -> Response {
    let spec = match ChartSpec::decode(
        &query.colors,
        &query.lengths,
        query.divisions.as_deref(),
    ) {
        Ok(spec) => spec,
        Err(e) => {
            warn!("Rejected chart request: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid chart specification: {}", e),
            )
                .into_response();
        }
    };

    match render_bar_chart(&spec) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            bytes,
        )
            .into_response(),
        Err(PoolscopeError::InvalidChartSpec(e)) => {
            warn!("Rejected chart request: {}", e);
            (
                StatusCode::BAD_REQUEST,
                format!("Invalid chart specification: {}", e),
            )
                .into_response()
        }
        Err(e) => {
            error!("Chart rendering failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn report_response(
    state: &ApiState,
    link: &str,
    resolve: impl FnOnce(&dyn PoolFacade) -> crate::utils::error::Result<MonitorView>,
) -> Response {
    match resolve(state.facade.as_ref()) {
        Ok(view) => Html(render_view(&view, link)).into_response(),
        Err(e) => {
            // Nothing has been written yet, so the client gets a clean
            // error instead of a truncated page.
            error!("Pool facade query failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
