// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// The single dashboard page
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Response {
    let figure = match state.dashboard_service.get_dashboard().await {
        Ok(figure) => figure,
        Err(e) => {
            tracing::error!("Error building dashboard: {:#}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match state.page.render(&figure) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Error rendering dashboard page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Figure description as JSON
pub async fn figure_json(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    match state.dashboard_service.get_dashboard().await {
        Ok(figure) => match json_response(&figure, compress).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => {
            tracing::error!("Error building dashboard: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
