//! Query interpretation, aggregation and narrative generation.
//!
//! # Module Organization
//!
//! - [`schema`]: discovers which columns hold area, year, price, demand and size
//! - [`aggregate`]: area filtering, summary statistics, trends and comparisons
//! - [`interpret`]: keyword intent classification and area extraction
//! - [`narrative`]: markdown reports built from statistics
//! - [`answer`]: end-to-end query answering
//!
//! Every operation borrows a [`Table`](estate_model::Table) and never mutates
//! it.

pub mod aggregate;
pub mod answer;
pub mod interpret;
pub mod narrative;
pub mod schema;

pub use aggregate::{
    Aggregator, available_areas, compare_areas, filter_by_area, summary_stats, trend,
};
pub use answer::{AnswerOptions, answer_query};
pub use interpret::{classify_intent, interpret, match_areas, mentions_demand};
pub use narrative::{
    render_analysis, render_clarification, render_comparison, render_no_data, render_summary,
};
pub use schema::{resolve_roles, resolve_table_roles};
