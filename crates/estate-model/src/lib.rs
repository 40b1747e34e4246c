//! Data model for Estate Insight.
//!
//! # Module Organization
//!
//! - [`table`]: the loaded dataset and table excerpt rows
//! - [`roles`]: semantic column roles and the resolved mapping
//! - [`stats`]: per-area summary statistics and their tiers
//! - [`trend`]: yearly series and multi-area comparisons
//! - [`chart`]: chart payloads derived from trends
//! - [`query`]: interpretation results and query responses

pub mod chart;
pub mod query;
pub mod roles;
pub mod stats;
pub mod table;
pub mod trend;

pub use chart::{Chart, ChartDataset, ComparisonChart, TrendChart};
pub use query::{Intent, Interpretation, QueryResponse};
pub use roles::{Role, RoleMapping};
pub use stats::{
    DemandLevel, DemandStats, GrowthDirection, GrowthOutlook, NoDataForArea, PriceStats,
    SummaryStats, YearRange,
};
pub use table::{CellValue, Record, Table, TableError, normalize_column_name};
pub use trend::{AreaSeries, ComparisonSeries, Metric, Trend, TrendPoint, TrendUnavailable};
