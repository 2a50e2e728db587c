// ABOUTME: HTTP request handlers for crops production operations
// ABOUTME: Handles CRUD, filtered listing, and spreadsheet import

use axum::{
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Deserializer};
use tracing::{error, info};

use cropstat_records::filter::RecordFilter;
use cropstat_records::import::{self, ImportError};
use cropstat_records::pagination::{PageMeta, PaginationParams, DEFAULT_PAGE_LENGTH, MIN_PAGE};
use cropstat_records::storage::StorageError;
use cropstat_records::types::RecordDraft;
use cropstat_records::validator::{validate_record_draft, ValidationError};
use cropstat_records::DbState;

use super::response;

/// Query parameters accepted by the listing endpoints. Filter values stay
/// raw strings; the store decides what non-numeric input means.
#[derive(Debug, Deserialize)]
pub struct ListCropsQuery {
    pub vegetable: Option<String>,
    pub province: Option<String>,
    pub year: Option<String>,
    pub production_min: Option<String>,
    pub production_max: Option<String>,
    pub search: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(rename = "pageLength", default = "default_page_length")]
    pub page_length: i64,
}

fn default_page() -> i64 {
    MIN_PAGE
}

fn default_page_length() -> i64 {
    DEFAULT_PAGE_LENGTH
}

impl ListCropsQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams::with_page_and_length(self.page, self.page_length)
    }

    fn into_filter(self) -> RecordFilter {
        RecordFilter {
            vegetable: self.vegetable,
            province: self.province,
            year: self.year,
            production_min: self.production_min,
            production_max: self.production_max,
            search: self.search,
        }
    }
}

async fn run_listing(db: &DbState, query: ListCropsQuery) -> impl IntoResponse {
    let pagination = query.pagination();
    let filter = query.into_filter();

    match db.records.query(&filter, &pagination).await {
        Ok((records, total)) => {
            let meta = PageMeta::new(&pagination, total);
            response::page_envelope(records, meta)
        }
        Err(e) => {
            error!("Failed to list crops production records: {}", e);
            response::internal_error("Failed to retrieve crops production data")
        }
    }
}

/// List crops production records with filters and pagination
pub async fn list_crops(
    State(db): State<DbState>,
    Query(query): Query<ListCropsQuery>,
) -> impl IntoResponse {
    info!("Listing crops production records (page: {})", query.page);

    run_listing(&db, query).await
}

/// Same filtering contract as the listing endpoint, consumed by dashboards
pub async fn get_data_for_stats(
    State(db): State<DbState>,
    Query(query): Query<ListCropsQuery>,
) -> impl IntoResponse {
    info!("Retrieving crops production data for statistics");

    run_listing(&db, query).await
}

/// Request body for creating or updating a record. Decimal fields accept
/// either a JSON string or a number; the fraction-digit rule is checked
/// against the string form.
#[derive(Debug, Deserialize)]
pub struct CropRequest {
    pub year: i64,
    pub province: String,
    pub vegetable: String,
    #[serde(deserialize_with = "string_or_number")]
    pub production: String,
    #[serde(deserialize_with = "string_or_number")]
    pub planted_area: String,
    #[serde(deserialize_with = "string_or_number")]
    pub harvested_area: String,
    pub fertilizer_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub fertilizer_amount: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

impl CropRequest {
    fn into_draft(self) -> RecordDraft {
        RecordDraft {
            year: self.year,
            province: self.province,
            vegetable: self.vegetable,
            production: self.production,
            planted_area: self.planted_area,
            harvested_area: self.harvested_area,
            fertilizer_type: self.fertilizer_type,
            fertilizer_amount: self.fertilizer_amount,
        }
    }
}

/// Create a new crops production record
pub async fn create_crop(
    State(db): State<DbState>,
    Json(request): Json<CropRequest>,
) -> impl IntoResponse {
    info!(
        "Creating crops production record for {} / {}",
        request.vegetable, request.province
    );

    let input = match validate_record_draft(&request.into_draft()) {
        Ok(input) => input,
        Err(errors) => return response::validation_failed(errors),
    };

    match db.records.create(input).await {
        Ok(record) => response::record_created(record),
        Err(e) => {
            error!("Failed to create crops production record: {}", e);
            response::internal_error("Failed to create crops production data")
        }
    }
}

/// Get a single crops production record by id
pub async fn get_crop(State(db): State<DbState>, Path(id): Path<i64>) -> impl IntoResponse {
    info!("Getting crops production record: {}", id);

    match db.records.find(id).await {
        Ok(Some(record)) => response::record_retrieved(record),
        Ok(None) => response::not_found(),
        Err(e) => {
            error!("Failed to get crops production record {}: {}", id, e);
            response::internal_error("Failed to retrieve crops production data")
        }
    }
}

/// Replace an existing crops production record
pub async fn update_crop(
    State(db): State<DbState>,
    Path(id): Path<i64>,
    Json(request): Json<CropRequest>,
) -> impl IntoResponse {
    info!("Updating crops production record: {}", id);

    // Missing records 404 before the body is validated.
    match db.records.find(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return response::not_found(),
        Err(e) => {
            error!("Failed to load crops production record {}: {}", id, e);
            return response::internal_error("Failed to update crops production data");
        }
    }

    let input = match validate_record_draft(&request.into_draft()) {
        Ok(input) => input,
        Err(errors) => return response::validation_failed(errors),
    };

    match db.records.update(id, input).await {
        Ok(record) => response::record_updated(record),
        Err(StorageError::NotFound) => response::not_found(),
        Err(e) => {
            error!("Failed to update crops production record {}: {}", id, e);
            response::internal_error("Failed to update crops production data")
        }
    }
}

/// Delete a crops production record
pub async fn delete_crop(State(db): State<DbState>, Path(id): Path<i64>) -> impl IntoResponse {
    info!("Deleting crops production record: {}", id);

    match db.records.delete(id).await {
        Ok(()) => response::record_deleted(),
        Err(StorageError::NotFound) => response::not_found(),
        Err(e) => {
            error!("Failed to delete crops production record {}: {}", id, e);
            response::internal_error("Failed to delete crops production data")
        }
    }
}

/// Bulk-import crops production records from an uploaded .xlsx file
pub async fn import_crops(
    State(db): State<DbState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    info!("Importing crops production records from upload");

    let mut filename: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return response::bad_request(format!("Multipart error: {e}")),
        };

        if field.name() == Some("file") {
            filename = field.file_name().map(|n| n.to_string());
            data = match field.bytes().await {
                Ok(bytes) => Some(bytes.to_vec()),
                Err(e) => return response::bad_request(format!("Read error: {e}")),
            };
        }
    }

    let (Some(filename), Some(data)) = (filename, data) else {
        return response::validation_failed(vec![ValidationError::new(
            "file",
            "The file field is required",
        )]);
    };

    match import::import_xlsx(db.records.as_ref(), &filename, &data, db.max_import_rows).await {
        Ok(_) => response::imported(),
        Err(ImportError::Format) => response::validation_failed(vec![ValidationError::new(
            "file",
            "The file must be a file of type: xlsx",
        )]),
        Err(
            e @ (ImportError::Workbook(_)
            | ImportError::Empty
            | ImportError::Header(_)
            | ImportError::RowBudget(_)),
        ) => response::bad_request(e.to_string()),
        Err(e) => {
            error!("Crops production import failed: {}", e);
            response::internal_error("Crops production import failed")
        }
    }
}
