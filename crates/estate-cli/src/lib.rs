//! CLI library components for Estate Insight.

pub mod logging;
pub mod report;
