//! CLI argument definitions for the campaign analyzer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ads_map::DEFAULT_MIN_CONFIDENCE;

#[derive(Parser)]
#[command(
    name = "ads-analyzer",
    version,
    about = "Campaign Analyzer - performance summaries and recommendations from ad exports",
    long_about = "Analyze an advertising-campaign CSV export.\n\n\
                  Maps arbitrary column names to the four canonical metrics (cost,\n\
                  conversions, clicks, impressions), aggregates per campaign and per\n\
                  month, and prints a performance summary with optimization\n\
                  recommendations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a campaign CSV export and print summary plus recommendations.
    Analyze(AnalyzeArgs),

    /// List the columns of a CSV export with hints and suggested roles.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the campaign CSV export.
    #[arg(value_name = "CSV_FILE")]
    pub input: PathBuf,

    /// Column holding cost values (default: best suggestion).
    #[arg(long = "cost-column", value_name = "COLUMN")]
    pub cost_column: Option<String>,

    /// Column holding conversion counts (default: best suggestion).
    #[arg(long = "conversions-column", value_name = "COLUMN")]
    pub conversions_column: Option<String>,

    /// Column holding click counts (default: best suggestion).
    #[arg(long = "clicks-column", value_name = "COLUMN")]
    pub clicks_column: Option<String>,

    /// Column holding impression counts (default: best suggestion).
    #[arg(long = "impressions-column", value_name = "COLUMN")]
    pub impressions_column: Option<String>,

    /// Currency label for amounts (default: the dataset's "Currency code"
    /// column, falling back to CHF).
    #[arg(long = "currency", value_name = "CODE")]
    pub currency: Option<String>,

    /// Minimum confidence for an automatic column suggestion.
    #[arg(long = "min-confidence", default_value_t = DEFAULT_MIN_CONFIDENCE)]
    pub min_confidence: f64,

    /// Emit the full analysis result as JSON instead of human output.
    #[arg(long = "json")]
    pub json: bool,

    /// Skip the detailed campaign and monthly performance tables.
    #[arg(long = "no-tables")]
    pub no_tables: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Path to the campaign CSV export.
    #[arg(value_name = "CSV_FILE")]
    pub input: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
