//! Per-column statistics used by the mapping engine.

use std::collections::{BTreeMap, BTreeSet};

use ads_model::{ColumnHint, Dataset};

/// Computes a [`ColumnHint`] for every column of the dataset.
pub fn build_column_hints(dataset: &Dataset) -> BTreeMap<String, ColumnHint> {
    let mut hints = BTreeMap::new();
    let row_count = dataset.rows.len();
    for (col_idx, header) in dataset.headers.iter().enumerate() {
        let mut non_null = 0usize;
        let mut numeric = 0usize;
        let mut uniques = BTreeSet::new();
        for row in &dataset.rows {
            let value = row.get(col_idx).map(String::as_str).unwrap_or("");
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            non_null += 1;
            uniques.insert(trimmed.to_string());
            if trimmed.replace(',', "").parse::<f64>().is_ok() {
                numeric += 1;
            }
        }
        let null_ratio = if row_count == 0 {
            1.0
        } else {
            (row_count.saturating_sub(non_null)) as f64 / row_count as f64
        };
        let unique_ratio = if non_null == 0 {
            0.0
        } else {
            uniques.len() as f64 / non_null as f64
        };
        let is_numeric = non_null > 0 && numeric == non_null;
        hints.insert(
            header.clone(),
            ColumnHint {
                is_numeric,
                unique_ratio,
                null_ratio,
            },
        );
    }
    hints
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

    #[test]
    fn numeric_columns_are_flagged() {
        let data = dataset(
            &["Campaign", "Cost"],
            &[&["Brand", "1,234.5"], &["Search", "7"]],
        );
        let hints = build_column_hints(&data);
        assert!(!hints["Campaign"].is_numeric);
        assert!(hints["Cost"].is_numeric);
    }

    #[test]
    fn null_and_unique_ratios() {
        let data = dataset(
            &["Campaign"],
            &[&["Brand"], &["Brand"], &[""], &["Search"]],
        );
        let hints = build_column_hints(&data);
        let hint = &hints["Campaign"];
        assert!((hint.null_ratio - 0.25).abs() < f64::EPSILON);
        assert!((hint.unique_ratio - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_dataset_yields_all_null() {
        let data = dataset(&["Cost"], &[]);
        let hints = build_column_hints(&data);
        assert!(!hints["Cost"].is_numeric);
        assert!((hints["Cost"].null_ratio - 1.0).abs() < f64::EPSILON);
    }
}
