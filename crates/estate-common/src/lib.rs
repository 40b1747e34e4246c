//! Shared helpers for Estate Insight crates.
//!
//! - [`values`]: reading polars cells as text, numbers and years
//! - [`format`]: number formatting used by narrative text and chart payloads

pub mod format;
pub mod values;

pub use format::{format_grouped, round2};
pub use values::{
    any_to_f64, any_to_string, any_to_string_non_empty, any_to_year, format_numeric, parse_f64,
};
