// GET handlers: data.json, version, api/app

use axum::{extract::State, response::IntoResponse};

use super::AppState;
use crate::flatten::flatten;

/// Package version (from Cargo.toml).
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
const NAME: &str = env!("CARGO_PKG_NAME");

/// GET /data.json — current window as flat records, newest first.
pub(super) async fn data_handler(State(state): State<AppState>) -> impl IntoResponse {
    let window = state.history.snapshot();
    axum::Json(flatten(&window))
}

/// GET /version — service name and version.
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/app — which app is charted and at what cadence.
pub(super) async fn app_info_handler(State(state): State<AppState>) -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": state.app.name,
        "guid": state.app.guid,
        "capacity": state.history.capacity(),
        "sampleIntervalSecs": state.sample_interval_secs,
    }))
}
