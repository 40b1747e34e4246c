//! Yearly series for one area and multi-area comparisons.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roles::Role;

/// A metric that can be charted over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Price,
    Demand,
}

impl Metric {
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Price => "price",
            Metric::Demand => "demand",
        }
    }

    /// Capitalized name used in chart titles.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Price => "Price",
            Metric::Demand => "Demand",
        }
    }

    /// The column role holding this metric.
    pub fn role(self) -> Role {
        match self {
            Metric::Price => Role::Price,
            Metric::Demand => Role::Demand,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean metric value for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i64,
    pub value: f64,
}

/// Per-year means of one metric for one area, ascending by year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub area: String,
    pub metric: Metric,
    pub points: Vec<TrendPoint>,
}

impl Trend {
    pub fn years(&self) -> Vec<i64> {
        self.points.iter().map(|point| point.year).collect()
    }

    pub fn value_for(&self, year: i64) -> Option<f64> {
        self.points
            .binary_search_by_key(&year, |point| point.year)
            .ok()
            .map(|idx| self.points[idx].value)
    }
}

/// Why a trend could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum TrendUnavailable {
    #[error("no data found for {area}")]
    NoRowsForArea { area: String },

    #[error("{metric} or year data not available")]
    MissingColumns { metric: Metric },
}

/// Several areas' trends aligned on a shared set of years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub metric: Metric,
    /// Sorted union of every series' years.
    pub labels: Vec<i64>,
    pub series: Vec<AreaSeries>,
}

impl ComparisonSeries {
    pub fn empty(metric: Metric) -> Self {
        Self {
            metric,
            labels: Vec::new(),
            series: Vec::new(),
        }
    }
}

/// One area's values, positionally aligned with [`ComparisonSeries::labels`].
/// Years the area has no data for hold `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSeries {
    pub area: String,
    pub values: Vec<Option<f64>>,
}
