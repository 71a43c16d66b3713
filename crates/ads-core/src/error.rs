//! Typed failures of the analytical core.

use thiserror::Error;

use ads_model::MetricRole;

/// Errors an analysis run can surface.
///
/// The two sentinel conventions (non-numeric cell coerced to `0`,
/// zero-conversions CPA of `+inf`) are defined semantics, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// The column mapping references a column the dataset does not have.
    #[error("mapped {role} column '{column}' not found in dataset")]
    UnknownColumn { role: MetricRole, column: String },

    /// A required structural column (e.g. `Campaign`) is missing.
    #[error("required column '{0}' not found in dataset")]
    MissingColumn(String),

    /// Grouping produced zero campaign rows; best/worst selection would
    /// be undefined.
    #[error("dataset contains no campaign rows to analyze")]
    EmptyDataset,

    /// Every candidate row has an undefined (NaN) value for the selection
    /// metric, so best/worst cannot be chosen.
    #[error("{metric} is undefined for every row; cannot select best or worst")]
    NoComparableRows { metric: &'static str },

    /// Period-over-period deltas need at least two monthly rows.
    #[error("period-over-period trend needs at least two monthly rows, got {rows}")]
    InsufficientData { rows: usize },
}
