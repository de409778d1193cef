//! Operational HTTP endpoints.
//!
//! - `/healthz`           : liveness
//! - `/debug/metrics`     : JSON snapshot of every metric history
//! - `/debug/metrics.bin` : the same snapshot as a binary frame

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use vitals_core::snapshot::wire;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Serving never fails: a degraded snapshot renders as the `null` sentinel.
pub async fn metrics_json(State(state): State<AppState>) -> Response {
    let body = state.registry().snapshot().render_json();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

pub async fn metrics_bin(State(state): State<AppState>) -> Response {
    let body = wire::encode_snapshot(&state.registry().snapshot());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/octet-stream")],
        body,
    )
        .into_response()
}
