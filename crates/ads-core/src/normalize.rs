//! Data normalizer: coerces mapped metric columns to numbers and groups
//! rows into aggregate tables.

use std::collections::HashMap;

use tracing::debug;

use ads_model::{AggregateRow, CAMPAIGN_COLUMN, ColumnMapping, Dataset, MONTH_COLUMN, MetricRole};

use crate::error::AnalyzeError;

/// Output of [`normalize`]: one aggregate table per grouping key.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Per-campaign sums, in first-occurrence input order.
    pub campaigns: Vec<AggregateRow>,
    /// Per-month sums when the dataset has a `Month` column, in input
    /// order (no calendar re-sort; label order is the caller's business).
    pub monthly: Option<Vec<AggregateRow>>,
}

/// Coerces a cell to a number; anything unparseable counts as `0.0`.
///
/// Thousands separators are stripped first (ad exports write costs as
/// `1,234.56`), but only when every comma sits in a thousands position;
/// a decimal-comma cell like `1,5` fails to parse and coerces to `0.0`
/// rather than being misread as `15`. Non-finite parse results also
/// coerce to `0.0` so a literal "NaN" cell cannot poison the sums.
#[must_use]
pub fn coerce_cell(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let cleaned = if trimmed.contains(',') {
        match strip_thousands_separators(trimmed) {
            Some(cleaned) => cleaned,
            None => return 0.0,
        }
    } else {
        trimmed.to_string()
    };
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Removes commas when they form valid thousands grouping (`1,234,567.89`):
/// first digit group of one to three digits, every later group exactly
/// three. Any other comma placement returns `None`.
fn strip_thousands_separators(value: &str) -> Option<String> {
    let (sign, rest) = match value.strip_prefix(['-', '+']) {
        Some(rest) => (&value[..1], rest),
        None => ("", value),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };
    let mut groups = int_part.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    let mut cleaned = String::with_capacity(value.len());
    cleaned.push_str(sign);
    cleaned.push_str(&digits);
    if let Some(frac) = frac_part {
        cleaned.push('.');
        cleaned.push_str(frac);
    }
    Some(cleaned)
}

/// Column positions of the four mapped metric columns.
struct MetricIndexes {
    cost: usize,
    conversions: usize,
    clicks: usize,
    impressions: usize,
}

fn resolve_indexes(dataset: &Dataset, mapping: &ColumnMapping) -> Result<MetricIndexes, AnalyzeError> {
    let index_of = |role: MetricRole| {
        let column = mapping.column(role);
        dataset
            .column_index(column)
            .ok_or_else(|| AnalyzeError::UnknownColumn {
                role,
                column: column.to_string(),
            })
    };
    Ok(MetricIndexes {
        cost: index_of(MetricRole::Cost)?,
        conversions: index_of(MetricRole::Conversions)?,
        clicks: index_of(MetricRole::Clicks)?,
        impressions: index_of(MetricRole::Impressions)?,
    })
}

fn group_rows(dataset: &Dataset, key_idx: usize, metrics: &MetricIndexes) -> Vec<AggregateRow> {
    let mut groups: Vec<AggregateRow> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (row_idx, _) in dataset.rows.iter().enumerate() {
        let key = dataset.cell(row_idx, key_idx);
        let position = match positions.get(key) {
            Some(position) => *position,
            None => {
                positions.insert(key.to_string(), groups.len());
                groups.push(AggregateRow::new(key));
                groups.len() - 1
            }
        };
        let group = &mut groups[position];
        group.cost += coerce_cell(dataset.cell(row_idx, metrics.cost));
        group.conversions += coerce_cell(dataset.cell(row_idx, metrics.conversions));
        group.clicks += coerce_cell(dataset.cell(row_idx, metrics.clicks));
        group.impressions += coerce_cell(dataset.cell(row_idx, metrics.impressions));
    }
    groups
}

/// Groups the dataset by campaign (and by month when present), summing
/// the four mapped metric columns.
///
/// Pure over its inputs: the dataset is only borrowed and new aggregate
/// tables are returned. No row is ever dropped for an unparseable cell.
pub fn normalize(dataset: &Dataset, mapping: &ColumnMapping) -> Result<Normalized, AnalyzeError> {
    let campaign_idx = dataset
        .column_index(CAMPAIGN_COLUMN)
        .ok_or_else(|| AnalyzeError::MissingColumn(CAMPAIGN_COLUMN.to_string()))?;
    let metrics = resolve_indexes(dataset, mapping)?;
    let campaigns = group_rows(dataset, campaign_idx, &metrics);
    let monthly = dataset
        .column_index(MONTH_COLUMN)
        .map(|month_idx| group_rows(dataset, month_idx, &metrics));
    debug!(
        campaigns = campaigns.len(),
        months = monthly.as_ref().map_or(0, Vec::len),
        "normalized dataset"
    );
    Ok(Normalized { campaigns, monthly })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(headers: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::new(
            headers.iter().map(ToString::to_string).collect(),
            rows.iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        )
    }

    fn mapping() -> ColumnMapping {
        ColumnMapping::new("Cost", "Conversions", "Clicks", "Impressions")
    }

    #[test]
    fn coerce_treats_garbage_as_zero() {
        assert_eq!(coerce_cell("12.5"), 12.5);
        assert_eq!(coerce_cell(" 1,234.56 "), 1234.56);
        assert_eq!(coerce_cell(""), 0.0);
        assert_eq!(coerce_cell("n/a"), 0.0);
        assert_eq!(coerce_cell("NaN"), 0.0);
        assert_eq!(coerce_cell("inf"), 0.0);
    }

    #[test]
    fn coerce_rejects_commas_outside_thousands_positions() {
        assert_eq!(coerce_cell("1,234,567.89"), 1_234_567.89);
        assert_eq!(coerce_cell("-1,234"), -1234.0);
        assert_eq!(coerce_cell("1,5"), 0.0);
        assert_eq!(coerce_cell("12,34"), 0.0);
        assert_eq!(coerce_cell(",123"), 0.0);
        assert_eq!(coerce_cell("1,2345"), 0.0);
    }

    #[test]
    fn groups_by_campaign_preserving_first_occurrence_order() {
        let data = dataset(
            &["Campaign", "Cost", "Conversions", "Clicks", "Impressions"],
            &[
                &["B", "50", "0", "5", "500"],
                &["A", "100", "10", "50", "1000"],
                &["B", "25", "2", "5", "100"],
            ],
        );
        let normalized = normalize(&data, &mapping()).expect("normalize");
        let keys: Vec<&str> = normalized
            .campaigns
            .iter()
            .map(|row| row.key.as_str())
            .collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(normalized.campaigns[0].cost, 75.0);
        assert_eq!(normalized.campaigns[0].conversions, 2.0);
        assert_eq!(normalized.campaigns[0].clicks, 10.0);
        assert_eq!(normalized.campaigns[0].impressions, 600.0);
        assert!(normalized.monthly.is_none());
    }

    #[test]
    fn bad_cells_contribute_zero_without_dropping_rows() {
        let data = dataset(
            &["Campaign", "Cost", "Conversions", "Clicks", "Impressions"],
            &[
                &["A", "oops", "1", "10", "100"],
                &["A", "5", "", "10", "100"],
            ],
        );
        let normalized = normalize(&data, &mapping()).expect("normalize");
        assert_eq!(normalized.campaigns.len(), 1);
        assert_eq!(normalized.campaigns[0].cost, 5.0);
        assert_eq!(normalized.campaigns[0].conversions, 1.0);
        assert_eq!(normalized.campaigns[0].clicks, 20.0);
    }

    #[test]
    fn campaign_grouping_is_case_sensitive() {
        let data = dataset(
            &["Campaign", "Cost", "Conversions", "Clicks", "Impressions"],
            &[&["brand", "1", "0", "0", "0"], &["Brand", "2", "0", "0", "0"]],
        );
        let normalized = normalize(&data, &mapping()).expect("normalize");
        assert_eq!(normalized.campaigns.len(), 2);
    }

    #[test]
    fn monthly_table_present_only_with_month_column() {
        let data = dataset(
            &["Campaign", "Month", "Cost", "Conversions", "Clicks", "Impressions"],
            &[
                &["A", "Jan", "10", "1", "100", "1000"],
                &["A", "Feb", "20", "2", "150", "1000"],
                &["B", "Jan", "5", "0", "10", "200"],
            ],
        );
        let normalized = normalize(&data, &mapping()).expect("normalize");
        let monthly = normalized.monthly.expect("monthly table");
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].key, "Jan");
        assert_eq!(monthly[0].cost, 15.0);
        assert_eq!(monthly[0].clicks, 110.0);
        assert_eq!(monthly[1].key, "Feb");
    }

    #[test]
    fn unknown_mapped_column_is_a_configuration_error() {
        let data = dataset(&["Campaign", "Cost"], &[&["A", "1"]]);
        let error = normalize(&data, &mapping()).unwrap_err();
        assert_eq!(
            error,
            AnalyzeError::UnknownColumn {
                role: MetricRole::Conversions,
                column: "Conversions".to_string(),
            }
        );
    }

    #[test]
    fn missing_campaign_column_is_rejected() {
        let data = dataset(
            &["Name", "Cost", "Conversions", "Clicks", "Impressions"],
            &[&["A", "1", "1", "1", "1"]],
        );
        let error = normalize(&data, &mapping()).unwrap_err();
        assert_eq!(error, AnalyzeError::MissingColumn("Campaign".to_string()));
    }
}
