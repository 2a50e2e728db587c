// ABOUTME: Integration tests for the spreadsheet importer
// ABOUTME: Covers header mapping, the row budget, and partial-commit behavior

use cropstat_records::filter::RecordFilter;
use cropstat_records::import::{import_xlsx, ImportError};
use cropstat_records::pagination::PaginationParams;
use cropstat_records::storage::sqlite::SqliteRecordStore;
use cropstat_records::storage::RecordStore;
use rust_xlsxwriter::Workbook;
use sqlx::sqlite::SqlitePoolOptions;

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

const HEADER: [&str; 8] = [
    "year",
    "province",
    "vegetable",
    "production",
    "planted_area",
    "harvested_area",
    "fertilizer_type",
    "fertilizer_amount",
];

async fn create_test_store() -> SqliteRecordStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE crops_production (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            year INTEGER NOT NULL,
            province TEXT NOT NULL,
            vegetable TEXT NOT NULL,
            production REAL NOT NULL,
            planted_area REAL NOT NULL,
            harvested_area REAL NOT NULL,
            fertilizer_type TEXT NOT NULL,
            fertilizer_amount REAL NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    SqliteRecordStore::new(pool)
}

fn build_workbook(rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(r as u32, c as u16, *text).unwrap();
                }
                Cell::Number(number) => {
                    worksheet.write_number(r as u32, c as u16, *number).unwrap();
                }
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

fn header_row() -> Vec<Cell<'static>> {
    HEADER.iter().map(|name| Cell::Text(*name)).collect()
}

fn data_row(year: f64, province: &'static str, vegetable: &'static str) -> Vec<Cell<'static>> {
    vec![
        Cell::Number(year),
        Cell::Text(province),
        Cell::Text(vegetable),
        Cell::Number(120.5),
        Cell::Number(14.0),
        Cell::Number(13.2),
        Cell::Text("Urea"),
        Cell::Number(3.75),
    ]
}

async fn all_records(store: &SqliteRecordStore) -> Vec<cropstat_records::ProductionRecord> {
    let (records, _) = store
        .query(&RecordFilter::default(), &PaginationParams::new())
        .await
        .unwrap();
    records
}

#[tokio::test]
async fn test_import_two_rows_creates_two_records() {
    let store = create_test_store().await;
    let data = build_workbook(&[
        header_row(),
        data_row(2023.0, "West Java", "Spinach"),
        data_row(2022.0, "Bali", "Carrot"),
    ]);

    let imported = import_xlsx(&store, "crops.xlsx", &data, 10_000).await.unwrap();
    assert_eq!(imported, 2);

    let records = all_records(&store).await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].year, 2023);
    assert_eq!(records[0].province, "West Java");
    assert_eq!(records[0].vegetable, "Spinach");
    assert_eq!(records[0].production, 120.5);
    assert_eq!(records[0].fertilizer_type, "Urea");
    assert_eq!(records[1].year, 2022);
    assert_eq!(records[1].vegetable, "Carrot");
}

#[tokio::test]
async fn test_import_maps_reordered_header() {
    let store = create_test_store().await;
    let data = build_workbook(&[
        vec![
            Cell::Text("vegetable"),
            Cell::Text("year"),
            Cell::Text("province"),
            Cell::Text("fertilizer_amount"),
            Cell::Text("production"),
            Cell::Text("planted_area"),
            Cell::Text("harvested_area"),
            Cell::Text("fertilizer_type"),
        ],
        vec![
            Cell::Text("Spinach"),
            Cell::Number(2023.0),
            Cell::Text("West Java"),
            Cell::Number(3.75),
            Cell::Number(120.5),
            Cell::Number(14.0),
            Cell::Number(13.2),
            Cell::Text("Urea"),
        ],
    ]);

    let imported = import_xlsx(&store, "crops.xlsx", &data, 10_000).await.unwrap();
    assert_eq!(imported, 1);

    let records = all_records(&store).await;
    assert_eq!(records[0].vegetable, "Spinach");
    assert_eq!(records[0].year, 2023);
    assert_eq!(records[0].province, "West Java");
    assert_eq!(records[0].fertilizer_amount, 3.75);
    assert_eq!(records[0].production, 120.5);
}

#[tokio::test]
async fn test_import_rejects_missing_header_column() {
    let store = create_test_store().await;
    let data = build_workbook(&[
        vec![Cell::Text("year"), Cell::Text("province")],
        data_row(2023.0, "Bali", "Carrot"),
    ]);

    let err = import_xlsx(&store, "crops.xlsx", &data, 10_000).await.unwrap_err();
    assert!(matches!(err, ImportError::Header(name) if name == "vegetable"));
    assert!(all_records(&store).await.is_empty());
}

#[tokio::test]
async fn test_import_rejects_non_xlsx_extension() {
    let store = create_test_store().await;
    let data = build_workbook(&[header_row(), data_row(2023.0, "Bali", "Carrot")]);

    let err = import_xlsx(&store, "crops.csv", &data, 10_000).await.unwrap_err();
    assert!(matches!(err, ImportError::Format));
    assert!(all_records(&store).await.is_empty());
}

#[tokio::test]
async fn test_import_accepts_uppercase_extension() {
    let store = create_test_store().await;
    let data = build_workbook(&[header_row(), data_row(2023.0, "Bali", "Carrot")]);

    let imported = import_xlsx(&store, "CROPS.XLSX", &data, 10_000).await.unwrap();
    assert_eq!(imported, 1);
}

#[tokio::test]
async fn test_import_enforces_row_budget_before_inserting() {
    let store = create_test_store().await;
    let data = build_workbook(&[
        header_row(),
        data_row(2023.0, "Bali", "Carrot"),
        data_row(2022.0, "Java", "Spinach"),
    ]);

    let err = import_xlsx(&store, "crops.xlsx", &data, 1).await.unwrap_err();
    assert!(matches!(err, ImportError::RowBudget(1)));
    assert!(all_records(&store).await.is_empty());
}

#[tokio::test]
async fn test_import_failure_keeps_prior_rows() {
    let store = create_test_store().await;
    let data = build_workbook(&[
        header_row(),
        data_row(2023.0, "Bali", "Carrot"),
        vec![
            Cell::Text("not-a-year"),
            Cell::Text("Java"),
            Cell::Text("Spinach"),
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Text("Urea"),
            Cell::Number(1.0),
        ],
        data_row(2021.0, "Sumatra", "Cabbage"),
    ]);

    let err = import_xlsx(&store, "crops.xlsx", &data, 10_000).await.unwrap_err();
    assert!(matches!(err, ImportError::Row { row: 3, .. }));

    // The first row stays committed; the failing row and everything after
    // it never land.
    let records = all_records(&store).await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].vegetable, "Carrot");
}

#[tokio::test]
async fn test_import_does_not_validate_values() {
    let store = create_test_store().await;
    // Out-of-range year and a 3-fraction-digit amount would both fail the
    // single-create path; the import path inserts them untouched.
    let data = build_workbook(&[
        header_row(),
        vec![
            Cell::Number(1990.0),
            Cell::Text("Bali"),
            Cell::Text("Carrot"),
            Cell::Number(12.345),
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Text("Urea"),
            Cell::Number(1.0),
        ],
    ]);

    let imported = import_xlsx(&store, "crops.xlsx", &data, 10_000).await.unwrap();
    assert_eq!(imported, 1);

    let records = all_records(&store).await;
    assert_eq!(records[0].year, 1990);
    assert_eq!(records[0].production, 12.345);
}
