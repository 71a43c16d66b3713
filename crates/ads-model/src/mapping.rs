//! Column mapping types binding source columns to canonical metrics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four canonical metrics every analysis needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricRole {
    Cost,
    Conversions,
    Clicks,
    Impressions,
}

impl MetricRole {
    pub const ALL: [MetricRole; 4] = [
        MetricRole::Cost,
        MetricRole::Conversions,
        MetricRole::Clicks,
        MetricRole::Impressions,
    ];

    /// Human-readable label used in CLI output and error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Conversions => "conversions",
            Self::Clicks => "clicks",
            Self::Impressions => "impressions",
        }
    }
}

impl fmt::Display for MetricRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A confirmed binding of each metric role to one dataset column.
///
/// The core validates it against the dataset on every run; callers are
/// responsible for persisting a confirmed mapping between runs if they
/// want to offer it as a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub cost: String,
    pub conversions: String,
    pub clicks: String,
    pub impressions: String,
}

impl ColumnMapping {
    pub fn new(
        cost: impl Into<String>,
        conversions: impl Into<String>,
        clicks: impl Into<String>,
        impressions: impl Into<String>,
    ) -> Self {
        Self {
            cost: cost.into(),
            conversions: conversions.into(),
            clicks: clicks.into(),
            impressions: impressions.into(),
        }
    }

    /// Column bound to the given role.
    #[must_use]
    pub fn column(&self, role: MetricRole) -> &str {
        match role {
            MetricRole::Cost => &self.cost,
            MetricRole::Conversions => &self.conversions,
            MetricRole::Clicks => &self.clicks,
            MetricRole::Impressions => &self.impressions,
        }
    }

    /// Role/column pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricRole, &str)> {
        MetricRole::ALL.into_iter().map(|role| (role, self.column(role)))
    }

    /// Columns bound to more than one role, in canonical role order.
    ///
    /// Reuse is permitted but almost always a user error, so the mapping
    /// layer warns about it.
    #[must_use]
    pub fn duplicate_columns(&self) -> Vec<&str> {
        let mut duplicates = Vec::new();
        let columns: Vec<&str> = self.iter().map(|(_, column)| column).collect();
        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].contains(column) && !duplicates.contains(column) {
                duplicates.push(*column);
            }
        }
        duplicates
    }
}
