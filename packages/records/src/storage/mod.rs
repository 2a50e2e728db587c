use async_trait::async_trait;
use thiserror::Error;

use crate::filter::RecordFilter;
use crate::pagination::PaginationParams;
use crate::types::{ProductionRecord, RecordInput};

// Re-export modules
pub mod sqlite;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Crops production record not found")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage interface for production records. Implementations persist whole
/// records; validation happens before anything reaches this boundary.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Prepare the backing schema.
    async fn initialize(&self) -> StorageResult<()>;

    /// Insert one record and return it with its generated id.
    async fn create(&self, input: RecordInput) -> StorageResult<ProductionRecord>;

    /// Look up a record by id.
    async fn find(&self, id: i64) -> StorageResult<Option<ProductionRecord>>;

    /// Replace every field of an existing record.
    async fn update(&self, id: i64, input: RecordInput) -> StorageResult<ProductionRecord>;

    /// Remove a record by id.
    async fn delete(&self, id: i64) -> StorageResult<()>;

    /// Run a filtered, paginated query. Returns one page of records plus the
    /// total match count across all pages.
    async fn query(
        &self,
        filter: &RecordFilter,
        page: &PaginationParams,
    ) -> StorageResult<(Vec<ProductionRecord>, i64)>;
}
