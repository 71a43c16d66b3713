pub mod dataset;
pub mod mapping;
pub mod result;

pub use dataset::{
    CAMPAIGN_COLUMN, CURRENCY_COLUMN, ColumnHint, DEFAULT_CURRENCY, Dataset, MONTH_COLUMN,
};
pub use mapping::{ColumnMapping, MetricRole};
pub use result::{AggregateRow, AnalysisResult, PerformanceRow, TrendDelta};
