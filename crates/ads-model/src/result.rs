//! Aggregate and result types produced by one analysis run.

use serde::{Deserialize, Serialize};

/// One group's summed raw metrics.
///
/// Produced by the normalizer, immutable afterward, and held only for the
/// duration of a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    /// Grouping key: a campaign name or a month label.
    pub key: String,
    pub cost: f64,
    pub conversions: f64,
    pub clicks: f64,
    pub impressions: f64,
}

impl AggregateRow {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cost: 0.0,
            conversions: 0.0,
            clicks: 0.0,
            impressions: 0.0,
        }
    }
}

/// An aggregate row extended with the derived ratio metrics.
///
/// `ctr`, `cpa` and `conv_rate` may be `+inf` or NaN per the zero-division
/// sentinels; renderers show those as `N/A`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub key: String,
    pub cost: f64,
    pub conversions: f64,
    pub clicks: f64,
    pub impressions: f64,
    /// Click-through rate: clicks / impressions * 100.
    pub ctr: f64,
    /// Cost per acquisition: cost / conversions, `+inf` when conversions is 0.
    pub cpa: f64,
    /// Conversion rate: conversions / clicks * 100.
    pub conv_rate: f64,
}

/// Percent change of clicks and cost between the two most recent periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendDelta {
    /// Label of the most recent period.
    pub latest: String,
    pub latest_clicks: f64,
    pub latest_cost: f64,
    pub clicks_change_pct: f64,
    pub cost_change_pct: f64,
    pub latest_ctr: f64,
    pub latest_conv_rate: f64,
}

/// Everything one analysis run hands to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Multi-line human-readable summary with the currency code inline.
    pub summary: String,
    /// Ordered optimization recommendations.
    pub recommendations: Vec<String>,
    /// Per-campaign aggregates in first-occurrence input order.
    pub campaigns: Vec<PerformanceRow>,
    /// Per-month aggregates, present only when the dataset has a Month column.
    pub monthly: Option<Vec<PerformanceRow>>,
    /// Period-over-period delta, present when two or more monthly rows exist.
    pub trend: Option<TrendDelta>,
}
