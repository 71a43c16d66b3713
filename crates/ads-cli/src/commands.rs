//! Subcommand implementations.

use anyhow::{Context, Result};

use ads_cli::pipeline::run_analysis;
use ads_cli::summary::{columns_table, print_analysis};
use ads_ingest::{build_column_hints, read_csv_table};
use ads_map::{DEFAULT_MIN_CONFIDENCE, MappingEngine, RoleOverrides};

use crate::cli::{AnalyzeArgs, ColumnsArgs};

pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let overrides = RoleOverrides {
        cost: args.cost_column.clone(),
        conversions: args.conversions_column.clone(),
        clicks: args.clicks_column.clone(),
        impressions: args.impressions_column.clone(),
    };
    let outcome = run_analysis(
        &args.input,
        &overrides,
        args.currency.as_deref(),
        args.min_confidence,
    )?;
    if args.json {
        let payload =
            serde_json::to_string_pretty(&outcome).context("serialize analysis result")?;
        println!("{payload}");
    } else {
        print_analysis(&outcome, !args.no_tables);
    }
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let dataset = read_csv_table(&args.input)?;
    let hints = build_column_hints(&dataset);
    let engine = MappingEngine::new(DEFAULT_MIN_CONFIDENCE, hints.clone());
    let suggestions = engine.suggest(&dataset.headers);
    println!("{}", columns_table(&dataset.headers, &hints, &suggestions));
    Ok(())
}
