use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One crops production record. The sole entity of the system, stored as a
/// flat row with no relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductionRecord {
    pub id: i64,
    pub year: i64,
    pub province: String,
    pub vegetable: String,
    pub production: f64,
    pub planted_area: f64,
    pub harvested_area: f64,
    pub fertilizer_type: String,
    pub fertilizer_amount: f64,
}

/// Raw submission as received from a client, before validation. Decimal
/// fields are kept in string form so the fraction-digit rule can be checked
/// against what was actually submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub year: i64,
    pub province: String,
    pub vegetable: String,
    pub production: String,
    pub planted_area: String,
    pub harvested_area: String,
    pub fertilizer_type: String,
    pub fertilizer_amount: String,
}

/// Validated full-record input used by create and update. Every field is
/// required; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordInput {
    pub year: i64,
    pub province: String,
    pub vegetable: String,
    pub production: f64,
    pub planted_area: f64,
    pub harvested_area: f64,
    pub fertilizer_type: String,
    pub fertilizer_amount: f64,
}
