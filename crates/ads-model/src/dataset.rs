//! In-memory tabular dataset passed from the ingest layer to the core.

use serde::{Deserialize, Serialize};

/// Grouping column every dataset must carry.
pub const CAMPAIGN_COLUMN: &str = "Campaign";
/// Optional period-label column enabling time-series analysis.
pub const MONTH_COLUMN: &str = "Month";
/// Optional currency column; the first row's value labels all amounts.
pub const CURRENCY_COLUMN: &str = "Currency code";

/// Currency used when the dataset does not carry one.
pub const DEFAULT_CURRENCY: &str = "CHF";

/// An ordered table of string cells with named columns.
///
/// All values are pre-materialized by the ingest layer; rows are
/// positionally aligned with `headers` (short rows are padded on read).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Position of a column by exact, case-sensitive header match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `row_idx` in the given column, empty string when absent.
    pub fn cell(&self, row_idx: usize, column_idx: usize) -> &str {
        self.rows
            .get(row_idx)
            .and_then(|row| row.get(column_idx))
            .map_or("", String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Currency label for the dataset: first row of `Currency code`,
    /// falling back to [`DEFAULT_CURRENCY`].
    pub fn currency(&self) -> String {
        self.column_index(CURRENCY_COLUMN)
            .map(|idx| self.cell(0, idx))
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_CURRENCY.to_string(), ToString::to_string)
    }
}

/// Hints about a source column's characteristics.
///
/// Computed once at ingest and used by the mapping engine to prefer
/// numeric-looking columns for metric roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnHint {
    /// True if every non-empty value parses as a number.
    pub is_numeric: bool,
    /// Ratio of unique values to non-null values (0.0 to 1.0).
    pub unique_ratio: f64,
    /// Ratio of null/missing values to total rows (0.0 to 1.0).
    pub null_ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                "Campaign".to_string(),
                "Cost".to_string(),
                "Currency code".to_string(),
            ],
            vec![
                vec!["Brand".to_string(), "10".to_string(), "EUR".to_string()],
                vec!["Search".to_string(), "20".to_string(), "EUR".to_string()],
            ],
        )
    }

    #[test]
    fn column_lookup_is_case_sensitive() {
        let dataset = sample();
        assert_eq!(dataset.column_index("Cost"), Some(1));
        assert_eq!(dataset.column_index("cost"), None);
    }

    #[test]
    fn currency_from_first_row() {
        assert_eq!(sample().currency(), "EUR");
    }

    #[test]
    fn currency_defaults_when_column_missing() {
        let dataset = Dataset::new(vec!["Campaign".to_string()], vec![]);
        assert_eq!(dataset.currency(), DEFAULT_CURRENCY);
    }

    #[test]
    fn cell_out_of_bounds_is_empty() {
        let dataset = sample();
        assert_eq!(dataset.cell(5, 0), "");
        assert_eq!(dataset.cell(0, 9), "");
    }
}
