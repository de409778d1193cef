//! Axum router wiring for the debug surface.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/debug/metrics", get(ops::metrics_json))
        .route("/debug/metrics.bin", get(ops::metrics_bin))
        .with_state(state)
}
