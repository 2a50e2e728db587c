// ABOUTME: Database connection management and shared handler state
// ABOUTME: Builds the SQLite pool, applies pragmas, and runs migrations

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::storage::sqlite::SqliteRecordStore;
use crate::storage::{RecordStore, StorageError};

const DEFAULT_DATABASE_PATH: &str = "./data/cropstat.db";

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub records: Arc<dyn RecordStore>,
    /// Upper bound on data rows a single spreadsheet import may insert.
    pub max_import_rows: usize,
}

impl DbState {
    /// Create new database state from an existing pool.
    pub fn new(pool: SqlitePool, max_import_rows: usize) -> Self {
        let records = Arc::new(SqliteRecordStore::new(pool.clone()));
        Self {
            pool,
            records,
            max_import_rows,
        }
    }

    /// Initialize database state with optional custom database path.
    pub async fn init_with_path(
        database_path: Option<PathBuf>,
        max_import_rows: usize,
    ) -> Result<Self, StorageError> {
        let database_path =
            database_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let database_url = format!("sqlite:{}", database_path.display());

        if !sqlx::Sqlite::database_exists(&database_url)
            .await
            .map_err(StorageError::Sqlx)?
        {
            debug!("Creating database at: {}", database_url);
            sqlx::Sqlite::create_database(&database_url)
                .await
                .map_err(StorageError::Sqlx)?;
        }

        // Configure connection pool
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        // Configure SQLite settings
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        let state = Self::new(pool, max_import_rows);
        state.records.initialize().await?;

        debug!("Database migrations completed");

        Ok(state)
    }
}
