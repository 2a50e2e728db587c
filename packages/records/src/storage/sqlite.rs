use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{RecordStore, StorageError, StorageResult};
use crate::filter::RecordFilter;
use crate::pagination::PaginationParams;
use crate::types::{ProductionRecord, RecordInput};

const RECORD_COLUMNS: &str = "id, year, province, vegetable, production, planted_area, \
                              harvested_area, fertilizer_type, fertilizer_amount";

/// SQLite implementation of RecordStore
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn initialize(&self) -> StorageResult<()> {
        info!("Initializing SQLite record store with migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;

        Ok(())
    }

    async fn create(&self, input: RecordInput) -> StorageResult<ProductionRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO crops_production (
                year, province, vegetable, production, planted_area,
                harvested_area, fertilizer_type, fertilizer_amount
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.year)
        .bind(&input.province)
        .bind(&input.vegetable)
        .bind(input.production)
        .bind(input.planted_area)
        .bind(input.harvested_area)
        .bind(&input.fertilizer_type)
        .bind(input.fertilizer_amount)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        let id = result.last_insert_rowid();
        debug!("Created crops production record {}", id);

        self.find(id).await?.ok_or(StorageError::NotFound)
    }

    async fn find(&self, id: i64) -> StorageResult<Option<ProductionRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM crops_production WHERE id = ?");
        let record = sqlx::query_as::<_, ProductionRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(record)
    }

    async fn update(&self, id: i64, input: RecordInput) -> StorageResult<ProductionRecord> {
        let result = sqlx::query(
            r#"
            UPDATE crops_production
            SET year = ?, province = ?, vegetable = ?, production = ?,
                planted_area = ?, harvested_area = ?, fertilizer_type = ?,
                fertilizer_amount = ?
            WHERE id = ?
            "#,
        )
        .bind(input.year)
        .bind(&input.province)
        .bind(&input.vegetable)
        .bind(input.production)
        .bind(input.planted_area)
        .bind(input.harvested_area)
        .bind(&input.fertilizer_type)
        .bind(input.fertilizer_amount)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Updated crops production record {}", id);

        self.find(id).await?.ok_or(StorageError::NotFound)
    }

    async fn delete(&self, id: i64) -> StorageResult<()> {
        let result = sqlx::query("DELETE FROM crops_production WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        debug!("Deleted crops production record {}", id);
        Ok(())
    }

    async fn query(
        &self,
        filter: &RecordFilter,
        page: &PaginationParams,
    ) -> StorageResult<(Vec<ProductionRecord>, i64)> {
        let (conditions, params) = filter.to_sql();
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM crops_production{where_clause}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for param in &params {
            count_query = count_query.bind(param);
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let (limit, offset) = page.validate();
        let page_sql = format!(
            "SELECT {RECORD_COLUMNS} FROM crops_production{where_clause} \
             ORDER BY id ASC LIMIT ? OFFSET ?"
        );
        let mut page_query = sqlx::query_as::<_, ProductionRecord>(&page_sql);
        for param in &params {
            page_query = page_query.bind(param);
        }
        let records = page_query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        debug!("Query matched {} of {} records", records.len(), total);
        Ok((records, total))
    }
}
