// HTTP routes: time series, app info, version, embedded dashboard

mod assets;
mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::history::HistoryBuffer;

/// The monitored app, as resolved at startup.
#[derive(Debug, Clone)]
pub struct AppIdentity {
    pub name: String,
    pub guid: String,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) history: Arc<HistoryBuffer>,
    pub(crate) app: Arc<AppIdentity>,
    pub(crate) sample_interval_secs: u64,
}

pub fn app(history: Arc<HistoryBuffer>, app: AppIdentity, sample_interval_secs: u64) -> Router {
    let state = AppState {
        history,
        app: Arc::new(app),
        sample_interval_secs,
    };
    Router::new()
        .route("/data.json", get(http::data_handler)) // GET /data.json
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/app", get(http::app_info_handler)) // GET /api/app
        .route("/", get(assets::index_handler)) // GET /
        .route("/{*path}", get(assets::asset_handler)) // GET /<asset>
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
