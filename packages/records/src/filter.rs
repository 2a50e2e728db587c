/// Optional constraints derived from listing query parameters.
///
/// Values are raw request strings: nothing here is type-checked before it is
/// handed to the store, so numeric comparisons against non-numeric input are
/// resolved (or rejected) by the store's own coercion rules. Absent
/// parameters impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Substring match on the crop name.
    pub vegetable: Option<String>,
    /// Substring match on the province.
    pub province: Option<String>,
    /// Exact match on the year.
    pub year: Option<String>,
    /// Inclusive lower bound on production.
    pub production_min: Option<String>,
    /// Inclusive upper bound on production.
    pub production_max: Option<String>,
    /// Free text matched against every field, OR-combined.
    pub search: Option<String>,
}

/// Every column `search` is matched against.
const SEARCH_COLUMNS: [&str; 9] = [
    "id",
    "year",
    "vegetable",
    "province",
    "production",
    "planted_area",
    "harvested_area",
    "fertilizer_type",
    "fertilizer_amount",
];

impl RecordFilter {
    /// Assemble WHERE-clause fragments and their bind parameters. Fragments
    /// compose conjunctively; the `search` disjunction is one fragment.
    pub(crate) fn to_sql(&self) -> (Vec<String>, Vec<String>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(vegetable) = &self.vegetable {
            conditions.push("vegetable LIKE ?".to_string());
            params.push(format!("%{vegetable}%"));
        }

        if let Some(province) = &self.province {
            conditions.push("province LIKE ?".to_string());
            params.push(format!("%{province}%"));
        }

        if let Some(year) = &self.year {
            conditions.push("year = ?".to_string());
            params.push(year.clone());
        }

        if let Some(min) = &self.production_min {
            conditions.push("production >= ?".to_string());
            params.push(min.clone());
        }

        if let Some(max) = &self.production_max {
            conditions.push("production <= ?".to_string());
            params.push(max.clone());
        }

        if let Some(search) = &self.search {
            let clauses: Vec<String> = SEARCH_COLUMNS
                .iter()
                .map(|column| format!("{column} LIKE ?"))
                .collect();
            conditions.push(format!("({})", clauses.join(" OR ")));

            let pattern = format!("%{search}%");
            for _ in SEARCH_COLUMNS {
                params.push(pattern.clone());
            }
        }

        (conditions, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_is_open() {
        let (conditions, params) = RecordFilter::default().to_sql();
        assert!(conditions.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_substring_filters_wrap_wildcards() {
        let filter = RecordFilter {
            vegetable: Some("Spin".to_string()),
            province: Some("Java".to_string()),
            ..Default::default()
        };
        let (conditions, params) = filter.to_sql();
        assert_eq!(conditions, vec!["vegetable LIKE ?", "province LIKE ?"]);
        assert_eq!(params, vec!["%Spin%", "%Java%"]);
    }

    #[test]
    fn test_year_and_bounds_pass_raw_values() {
        let filter = RecordFilter {
            year: Some("2023".to_string()),
            production_min: Some("10".to_string()),
            production_max: Some("99.5".to_string()),
            ..Default::default()
        };
        let (conditions, params) = filter.to_sql();
        assert_eq!(
            conditions,
            vec!["year = ?", "production >= ?", "production <= ?"]
        );
        assert_eq!(params, vec!["2023", "10", "99.5"]);
    }

    #[test]
    fn test_search_spans_all_nine_columns() {
        let filter = RecordFilter {
            search: Some("2023".to_string()),
            ..Default::default()
        };
        let (conditions, params) = filter.to_sql();
        assert_eq!(conditions.len(), 1);
        assert!(conditions[0].starts_with("(id LIKE ?"));
        assert_eq!(conditions[0].matches(" OR ").count(), 8);
        assert_eq!(params.len(), 9);
        assert!(params.iter().all(|p| p == "%2023%"));
    }

    #[test]
    fn test_search_conjoins_with_other_filters() {
        let filter = RecordFilter {
            year: Some("2023".to_string()),
            search: Some("Urea".to_string()),
            ..Default::default()
        };
        let (conditions, params) = filter.to_sql();
        assert_eq!(conditions.len(), 2);
        assert_eq!(params.len(), 10);
    }
}
