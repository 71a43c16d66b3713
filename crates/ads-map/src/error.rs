//! Error types for mapping operations.

use std::fmt;

use ads_model::MetricRole;

/// Errors from mapping resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// An explicit override names a column the dataset does not have.
    UnknownColumn { role: MetricRole, column: String },
    /// No override was given and no suggestion cleared the threshold.
    Unresolved { role: MetricRole },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColumn { role, column } => {
                write!(f, "column '{column}' for {role} not found in dataset")
            }
            Self::Unresolved { role } => write!(
                f,
                "no column could be resolved for {role}; pass --{role}-column"
            ),
        }
    }
}

impl std::error::Error for MapError {}
