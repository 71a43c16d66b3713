//! Analysis pipeline with explicit stages.
//!
//! 1. **Ingest**: read the CSV export into a [`Dataset`]
//! 2. **Map**: resolve the column mapping from overrides and suggestions
//! 3. **Normalize**: coerce metric columns and group by campaign/month
//! 4. **Analyze**: derive metrics, summary, and recommendations
//!
//! Each stage takes the output of the previous one; all failures bubble
//! up as typed errors wrapped in `anyhow` context.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use ads_core::{analyze, normalize};
use ads_ingest::{build_column_hints, read_csv_table};
use ads_map::{MappingEngine, RoleOverrides};
use ads_model::{AnalysisResult, ColumnMapping, Dataset};

/// Everything one pipeline run produces, including the resolved mapping
/// so callers can display it or persist it as the next run's default.
#[derive(Debug, Serialize)]
pub struct AnalyzeOutcome {
    pub mapping: ColumnMapping,
    pub currency: String,
    pub input_rows: usize,
    pub result: AnalysisResult,
}

/// Runs the full pipeline over one CSV file.
pub fn run_analysis(
    input: &Path,
    overrides: &RoleOverrides,
    currency_override: Option<&str>,
    min_confidence: f64,
) -> Result<AnalyzeOutcome> {
    let span = info_span!("analysis", input = %input.display());
    let _guard = span.enter();

    let dataset = read_csv_table(input).context("ingest csv")?;
    info!(
        rows = dataset.len(),
        columns = dataset.headers.len(),
        "dataset loaded"
    );

    let mapping = resolve_mapping(&dataset, overrides, min_confidence)?;
    info!(
        cost = %mapping.cost,
        conversions = %mapping.conversions,
        clicks = %mapping.clicks,
        impressions = %mapping.impressions,
        "column mapping resolved"
    );

    let currency = currency_override.map_or_else(|| dataset.currency(), ToString::to_string);
    let normalized = normalize(&dataset, &mapping).context("normalize dataset")?;
    let result = analyze(&normalized.campaigns, normalized.monthly.as_deref(), &currency)
        .context("analyze aggregates")?;
    info!(
        campaigns = result.campaigns.len(),
        months = result.monthly.as_ref().map_or(0, Vec::len),
        recommendations = result.recommendations.len(),
        "analysis complete"
    );

    Ok(AnalyzeOutcome {
        mapping,
        currency,
        input_rows: dataset.len(),
        result,
    })
}

/// Resolves the column mapping for a dataset from explicit overrides plus
/// engine suggestions.
pub fn resolve_mapping(
    dataset: &Dataset,
    overrides: &RoleOverrides,
    min_confidence: f64,
) -> Result<ColumnMapping> {
    let hints = build_column_hints(dataset);
    let engine = MappingEngine::new(min_confidence, hints);
    let mapping = engine
        .resolve(&dataset.headers, overrides)
        .context("resolve column mapping")?;
    Ok(mapping)
}
