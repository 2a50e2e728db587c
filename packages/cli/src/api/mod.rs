use axum::{routing::get, Router};

use cropstat_records::DbState;

pub mod health;

pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .nest("/crops-production", cropstat_api::create_crops_router())
        .with_state(db)
}
