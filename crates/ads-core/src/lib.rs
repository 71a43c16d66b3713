//! Analytical core: data normalization, derived metrics, and the
//! recommendation engine.
//!
//! The core is pure and synchronous. It consumes an in-memory [`Dataset`]
//! plus a confirmed [`ColumnMapping`], and produces an
//! [`AnalysisResult`] for the presentation layer. It never reads files,
//! prints, or holds state between runs; failures surface as typed
//! [`AnalyzeError`] values.
//!
//! [`Dataset`]: ads_model::Dataset
//! [`ColumnMapping`]: ads_model::ColumnMapping
//! [`AnalysisResult`]: ads_model::AnalysisResult

pub mod engine;
pub mod error;
pub mod metrics;
pub mod normalize;

pub use engine::{analyze, best_by_conv_rate, period_over_period, worst_by_conv_rate};
pub use error::AnalyzeError;
pub use metrics::{derive, derive_all, format_amount, format_count, format_rate, format_signed_pct};
pub use normalize::{Normalized, coerce_cell, normalize};
