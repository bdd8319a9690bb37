pub mod protocol;
pub mod rest;
pub mod schema;
pub mod state;
pub mod ws_handler;

#[cfg(test)]
mod test_support;

// Re-export the handlers so the binary and the tests build the same router.
pub use rest::{
    animation_finished_handler, blob_handler, capture_photo_handler, close_panel_handler,
    current_location_handler, download_photo_handler, focus_photo_handler, list_photos_handler,
    map_view_handler, open_panel_handler, report_location_handler,
};
pub use ws_handler::ws_handler;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// All API routes, without CORS or documentation layers.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/location",
            get(current_location_handler).post(report_location_handler),
        )
        .route(
            "/photos",
            get(list_photos_handler).post(capture_photo_handler),
        )
        .route("/photos/{id}/focus", post(focus_photo_handler))
        .route("/photos/{id}/download", get(download_photo_handler))
        .route("/focus/complete", post(animation_finished_handler))
        .route("/map", get(map_view_handler))
        .route("/panel/open", post(open_panel_handler))
        .route("/panel/close", post(close_panel_handler))
        .route("/blobs/{handle}", get(blob_handler))
        .route("/ws", get(ws_handler))
        .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes))
        .with_state(app_state)
}
