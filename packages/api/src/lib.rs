// ABOUTME: HTTP API layer for Cropstat providing REST endpoints and routing
// ABOUTME: Integration layer over the records domain crate

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

use cropstat_records::DbState;

pub mod crops_handlers;
pub mod response;

/// Spreadsheet uploads above this size are rejected outright.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Creates the crops production API router
pub fn create_crops_router() -> Router<DbState> {
    Router::new()
        .route("/", get(crops_handlers::list_crops))
        .route("/", post(crops_handlers::create_crop))
        .route("/stats", get(crops_handlers::get_data_for_stats))
        .route(
            "/import",
            post(crops_handlers::import_crops).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/{id}", get(crops_handlers::get_crop))
        .route(
            "/{id}",
            put(crops_handlers::update_crop).patch(crops_handlers::update_crop),
        )
        .route("/{id}", delete(crops_handlers::delete_crop))
}
