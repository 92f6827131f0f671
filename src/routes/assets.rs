// Static dashboard assets. Unknown paths get 404 with an empty body.

use axum::{
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::assets;

/// GET /
pub(super) async fn index_handler() -> Response {
    serve(assets::INDEX)
}

/// GET /<path>
pub(super) async fn asset_handler(Path(path): Path<String>) -> Response {
    serve(&path)
}

fn serve(path: &str) -> Response {
    let content_type = assets::content_type(path);
    match assets::lookup(path) {
        Some(bytes) => (
            [(header::CONTENT_TYPE, content_type)],
            Bytes::from_static(bytes),
        )
            .into_response(),
        None => {
            tracing::debug!(path, "asset not found");
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, content_type)],
                Bytes::new(),
            )
                .into_response()
        }
    }
}
