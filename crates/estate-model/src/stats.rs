//! Per-area summary statistics and their classifications.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Statistics for a single area.
///
/// Each optional block is absent when its column could not be resolved or
/// held no numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub area: String,
    pub total_records: usize,
    pub price: Option<PriceStats>,
    pub demand: Option<DemandStats>,
    pub avg_size: Option<f64>,
}

impl SummaryStats {
    /// Year span the price figures were computed over, if it covers two or
    /// more distinct years.
    pub fn years_analyzed(&self) -> Option<YearRange> {
        self.price.as_ref().and_then(|price| price.years_analyzed)
    }

    pub fn growth_pct(&self) -> Option<f64> {
        self.price.as_ref().and_then(|price| price.growth_pct)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Percent change between the first and last year's mean price.
    /// Absent with fewer than two years or a zero first-year mean.
    pub growth_pct: Option<f64>,
    pub years_analyzed: Option<YearRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl DemandStats {
    pub fn level(&self) -> DemandLevel {
        DemandLevel::from_index(self.avg)
    }
}

/// An inclusive range of calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub first: i64,
    pub last: i64,
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// The requested area has no rows (or the dataset has no area column).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("no data found for {area}")]
pub struct NoDataForArea {
    pub area: String,
}

impl NoDataForArea {
    pub fn new(area: impl Into<String>) -> Self {
        Self { area: area.into() }
    }
}

/// Demand tier of an average demand index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    High,
    Moderate,
    Low,
}

impl DemandLevel {
    /// `70` and `40` are inclusive lower bounds of `High` and `Moderate`.
    pub fn from_index(index: f64) -> Self {
        if index >= 70.0 {
            DemandLevel::High
        } else if index >= 40.0 {
            DemandLevel::Moderate
        } else {
            DemandLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DemandLevel::High => "High",
            DemandLevel::Moderate => "Moderate",
            DemandLevel::Low => "Low",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            DemandLevel::High => "🔥",
            DemandLevel::Moderate => "⚡",
            DemandLevel::Low => "💤",
        }
    }
}

/// Sign of a price growth figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthDirection {
    Increased,
    Decreased,
    Stable,
}

impl GrowthDirection {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 0.0 {
            GrowthDirection::Increased
        } else if percent < 0.0 {
            GrowthDirection::Decreased
        } else {
            GrowthDirection::Stable
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            GrowthDirection::Increased => "increased",
            GrowthDirection::Decreased => "decreased",
            GrowthDirection::Stable => "remained stable",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            GrowthDirection::Increased => "📈",
            GrowthDirection::Decreased => "📉",
            GrowthDirection::Stable => "➡️",
        }
    }
}

/// How a growth figure is framed in the insights section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthOutlook {
    /// Strictly above 5%.
    Strong,
    /// 0% to 5% inclusive.
    Steady,
    Decline,
}

impl GrowthOutlook {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 5.0 {
            GrowthOutlook::Strong
        } else if percent >= 0.0 {
            GrowthOutlook::Steady
        } else {
            GrowthOutlook::Decline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demand_tier_boundaries() {
        assert_eq!(DemandLevel::from_index(70.0), DemandLevel::High);
        assert_eq!(DemandLevel::from_index(69.99), DemandLevel::Moderate);
        assert_eq!(DemandLevel::from_index(40.0), DemandLevel::Moderate);
        assert_eq!(DemandLevel::from_index(39.99), DemandLevel::Low);
    }

    #[test]
    fn growth_outlook_boundaries() {
        assert_eq!(GrowthOutlook::from_percent(5.0), GrowthOutlook::Steady);
        assert_eq!(GrowthOutlook::from_percent(5.01), GrowthOutlook::Strong);
        assert_eq!(GrowthOutlook::from_percent(0.0), GrowthOutlook::Steady);
        assert_eq!(GrowthOutlook::from_percent(-0.01), GrowthOutlook::Decline);
    }

    #[test]
    fn growth_direction() {
        assert_eq!(GrowthDirection::from_percent(3.0).verb(), "increased");
        assert_eq!(GrowthDirection::from_percent(-3.0).verb(), "decreased");
        assert_eq!(GrowthDirection::from_percent(0.0).verb(), "remained stable");
    }

    #[test]
    fn year_range_display() {
        let range = YearRange {
            first: 2019,
            last: 2023,
        };
        assert_eq!(range.to_string(), "2019-2023");
    }

    #[test]
    fn no_data_message() {
        assert_eq!(
            NoDataForArea::new("Hinjewadi").to_string(),
            "no data found for Hinjewadi"
        );
    }
}
