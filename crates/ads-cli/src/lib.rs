//! CLI library components for the campaign analyzer.

pub mod logging;
pub mod pipeline;
pub mod summary;
