use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde::Serialize;

use crate::types::{RecordDraft, RecordInput};

/// Integer part plus an optional 1-2 digit fraction. No sign, so negative
/// amounts never match.
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("decimal pattern is valid"));

/// Earliest year a record may carry.
pub const MIN_YEAR: i64 = 2000;

/// Validation errors for record data
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Upper bound for the year field: next calendar year.
pub fn max_year() -> i64 {
    i64::from(chrono::Utc::now().year()) + 1
}

/// Validates a submitted record eagerly, before any store mutation.
/// Returns the parsed input on success or every field-level error at once.
pub fn validate_record_draft(draft: &RecordDraft) -> Result<RecordInput, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let max_year = max_year();
    if draft.year < MIN_YEAR || draft.year > max_year {
        errors.push(ValidationError::new(
            "year",
            format!("The year must be a 4 digit year between {MIN_YEAR} and {max_year}"),
        ));
    }

    for (field, value) in [
        ("province", &draft.province),
        ("vegetable", &draft.vegetable),
        ("fertilizer_type", &draft.fertilizer_type),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(
                field,
                format!("The {field} field is required"),
            ));
        }
    }

    let production = check_decimal(&mut errors, "production", &draft.production);
    let planted_area = check_decimal(&mut errors, "planted_area", &draft.planted_area);
    let harvested_area = check_decimal(&mut errors, "harvested_area", &draft.harvested_area);
    let fertilizer_amount = check_decimal(&mut errors, "fertilizer_amount", &draft.fertilizer_amount);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(RecordInput {
        year: draft.year,
        province: draft.province.clone(),
        vegetable: draft.vegetable.clone(),
        production,
        planted_area,
        harvested_area,
        fertilizer_type: draft.fertilizer_type.clone(),
        fertilizer_amount,
    })
}

fn check_decimal(errors: &mut Vec<ValidationError>, field: &str, value: &str) -> f64 {
    if DECIMAL_RE.is_match(value) {
        // The pattern only admits digit strings, which always parse.
        value.parse().unwrap_or(0.0)
    } else {
        errors.push(ValidationError::new(
            field,
            format!("The {field} must be a non-negative number with at most 2 decimal places"),
        ));
        0.0
    }
}
