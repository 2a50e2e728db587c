// ABOUTME: Bulk spreadsheet-to-record ingestion path
// ABOUTME: Reads an uploaded .xlsx, maps columns by header, inserts row by row

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use thiserror::Error;
use tracing::{debug, info};

use crate::storage::{RecordStore, StorageError};
use crate::types::RecordInput;

/// Column names the header row must provide, in any order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "year",
    "province",
    "vegetable",
    "production",
    "planted_area",
    "harvested_area",
    "fertilizer_type",
    "fertilizer_amount",
];

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Only .xlsx files can be imported")]
    Format,
    #[error("Could not read workbook: {0}")]
    Workbook(String),
    #[error("Workbook has no data sheet")]
    Empty,
    #[error("Header row is missing required column '{0}'")]
    Header(String),
    #[error("Import exceeds the row budget of {0} rows")]
    RowBudget(usize),
    #[error("Row {row}: {message}")]
    Row { row: usize, message: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Positions of the required columns within a sheet's header row.
#[derive(Debug)]
struct ColumnMap {
    year: usize,
    province: usize,
    vegetable: usize,
    production: usize,
    planted_area: usize,
    harvested_area: usize,
    fertilizer_type: usize,
    fertilizer_amount: usize,
}

/// Import every data row of the first sheet of an `.xlsx` upload.
///
/// The first row is the header and is validated to name all required
/// columns before anything is inserted. Data rows are inserted one at a
/// time with no transaction and no value validation: the first failing row
/// aborts the rest while rows already inserted stay committed. Returns the
/// number of records inserted.
pub async fn import_xlsx(
    store: &dyn RecordStore,
    filename: &str,
    data: &[u8],
    max_rows: usize,
) -> Result<usize, ImportError> {
    if !filename.to_ascii_lowercase().ends_with(".xlsx") {
        return Err(ImportError::Format);
    }

    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(data)).map_err(|e| ImportError::Workbook(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::Empty)?
        .map_err(|e| ImportError::Workbook(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(ImportError::Empty)?;
    let columns = map_columns(header)?;

    let data_rows = range.height().saturating_sub(1);
    if data_rows > max_rows {
        return Err(ImportError::RowBudget(max_rows));
    }
    debug!("Importing {} data rows from {}", data_rows, filename);

    let mut imported = 0usize;
    for (index, row) in rows.enumerate() {
        // Row numbers are 1-based and include the header.
        let input = row_to_input(&columns, row, index + 2)?;
        store.create(input).await?;
        imported += 1;
    }

    info!(
        "Imported {} crops production records from {}",
        imported, filename
    );
    Ok(imported)
}

fn map_columns(header: &[Data]) -> Result<ColumnMap, ImportError> {
    let names: Vec<String> = header.iter().map(cell_to_string).collect();
    let position = |name: &str| -> Result<usize, ImportError> {
        names
            .iter()
            .position(|n| n.trim() == name)
            .ok_or_else(|| ImportError::Header(name.to_string()))
    };

    Ok(ColumnMap {
        year: position("year")?,
        province: position("province")?,
        vegetable: position("vegetable")?,
        production: position("production")?,
        planted_area: position("planted_area")?,
        harvested_area: position("harvested_area")?,
        fertilizer_type: position("fertilizer_type")?,
        fertilizer_amount: position("fertilizer_amount")?,
    })
}

fn row_to_input(
    columns: &ColumnMap,
    row: &[Data],
    row_number: usize,
) -> Result<RecordInput, ImportError> {
    Ok(RecordInput {
        year: int_cell(row, columns.year, "year", row_number)?,
        province: text_cell(row, columns.province, "province", row_number)?,
        vegetable: text_cell(row, columns.vegetable, "vegetable", row_number)?,
        production: number_cell(row, columns.production, "production", row_number)?,
        planted_area: number_cell(row, columns.planted_area, "planted_area", row_number)?,
        harvested_area: number_cell(row, columns.harvested_area, "harvested_area", row_number)?,
        fertilizer_type: text_cell(row, columns.fertilizer_type, "fertilizer_type", row_number)?,
        fertilizer_amount: number_cell(
            row,
            columns.fertilizer_amount,
            "fertilizer_amount",
            row_number,
        )?,
    })
}

fn text_cell(
    row: &[Data],
    index: usize,
    column: &str,
    row_number: usize,
) -> Result<String, ImportError> {
    match row.get(index) {
        Some(cell) => Ok(cell_to_string(cell)),
        None => Err(ImportError::Row {
            row: row_number,
            message: format!("missing value for column '{column}'"),
        }),
    }
}

fn int_cell(row: &[Data], index: usize, column: &str, row_number: usize) -> Result<i64, ImportError> {
    let raw = text_cell(row, index, column, row_number)?;
    raw.trim().parse().map_err(|_| ImportError::Row {
        row: row_number,
        message: format!("'{raw}' is not an integer in column '{column}'"),
    })
}

fn number_cell(
    row: &[Data],
    index: usize,
    column: &str,
    row_number: usize,
) -> Result<f64, ImportError> {
    let raw = text_cell(row, index, column, row_number)?;
    raw.trim().parse().map_err(|_| ImportError::Row {
        row: row_number,
        message: format!("'{raw}' is not a number in column '{column}'"),
    })
}

/// Render a cell the way it reads in the sheet. Whole floats drop their
/// fraction so a year cell of 2023.0 maps to "2023".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
