// ABOUTME: Response envelope builders for the crops production API
// ABOUTME: Shapes list pages, single records, and error bodies

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use cropstat_records::pagination::PageMeta;
use cropstat_records::types::ProductionRecord;
use cropstat_records::validator::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "Crops production data not found";

/// Page envelope shared by the listing and stats endpoints. An empty page
/// reports status "failed" but is still HTTP 200 — no matches is not an
/// error.
pub fn page_envelope(records: Vec<ProductionRecord>, meta: PageMeta) -> (StatusCode, Json<Value>) {
    if records.is_empty() {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "failed",
                "message": "No crops productions found",
                "data": [],
                "pagination": meta,
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Lists of Crops Production have been retrieved successfully",
            "data": records,
            "pagination": meta,
        })),
    )
}

pub fn record_retrieved(record: ProductionRecord) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Crops production data has been retrieved successfully",
            "data": record,
        })),
    )
}

pub fn record_created(record: ProductionRecord) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Crops production data has been created successfully",
            "data": record,
        })),
    )
}

pub fn record_updated(record: ProductionRecord) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Crops production data has been updated successfully",
            "data": record,
        })),
    )
}

pub fn record_deleted() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Crops production data has been deleted successfully",
        })),
    )
}

pub fn imported() -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Crops production data has been imported successfully",
        })),
    )
}

/// Bare not-found body, deliberately without a "status" key.
pub fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": NOT_FOUND_MESSAGE })),
    )
}

pub fn validation_failed(errors: Vec<ValidationError>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "The given data was invalid",
            "errors": errors,
        })),
    )
}

pub fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": message })))
}

pub fn internal_error(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": message })),
    )
}
