//! CSV loading into the in-memory [`Dataset`].

use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::debug;

use ads_model::Dataset;

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV export into a [`Dataset`].
///
/// The first non-empty row is the header. Cells are trimmed and stripped
/// of BOM markers; fully-empty rows are skipped; short rows are padded to
/// header width so every row is positionally aligned with the headers.
pub fn read_csv_table(path: &Path) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let raw: Vec<String> = record.iter().map(normalize_cell).collect();
        if raw.iter().all(|value| value.is_empty()) {
            continue;
        }
        match &headers {
            None => {
                headers = Some(raw.iter().map(|value| normalize_header(value)).collect());
            }
            Some(header_row) => {
                let mut row = Vec::with_capacity(header_row.len());
                for idx in 0..header_row.len() {
                    row.push(raw.get(idx).cloned().unwrap_or_default());
                }
                rows.push(row);
            }
        }
    }
    let Some(headers) = headers else {
        bail!("empty csv file: {}", path.display());
    };
    debug!(
        columns = headers.len(),
        rows = rows.len(),
        path = %path.display(),
        "loaded csv table"
    );
    Ok(Dataset::new(headers, rows))
}
