//! Chart-ready payloads.
//!
//! Both shapes serialize without a tag; callers tell them apart by the
//! presence of `data` (single series) or `datasets` (comparison).

use serde::{Deserialize, Serialize};

use estate_common::round2;

use crate::trend::{ComparisonSeries, Metric, Trend};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Chart {
    Trend(TrendChart),
    Comparison(ComparisonChart),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendChart {
    pub labels: Vec<i64>,
    pub data: Vec<f64>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonChart {
    pub labels: Vec<i64>,
    pub datasets: Vec<ChartDataset>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
}

impl From<&Trend> for TrendChart {
    fn from(trend: &Trend) -> Self {
        Self {
            labels: trend.years(),
            data: trend.points.iter().map(|point| round2(point.value)).collect(),
            title: format!("{} Trend for {}", trend.metric.title(), trend.area),
            kind: trend.metric,
        }
    }
}

impl From<&ComparisonSeries> for ComparisonChart {
    fn from(series: &ComparisonSeries) -> Self {
        Self {
            labels: series.labels.clone(),
            datasets: series
                .series
                .iter()
                .map(|area| ChartDataset {
                    label: area.area.clone(),
                    data: area.values.iter().map(|v| v.map(round2)).collect(),
                })
                .collect(),
            title: format!("{} Comparison", series.metric.title()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::{AreaSeries, TrendPoint};

    #[test]
    fn trend_chart_serializes_with_data_key() {
        let trend = Trend {
            area: "Aundh".to_string(),
            metric: Metric::Price,
            points: vec![TrendPoint {
                year: 2021,
                value: 6500.456,
            }],
        };
        let chart = Chart::Trend(TrendChart::from(&trend));
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["title"], "Price Trend for Aundh");
        assert_eq!(json["type"], "price");
        assert_eq!(json["data"][0], 6500.46);
        assert!(json.get("datasets").is_none());
    }

    #[test]
    fn comparison_chart_null_fills() {
        let series = ComparisonSeries {
            metric: Metric::Demand,
            labels: vec![2020, 2021],
            series: vec![AreaSeries {
                area: "Wakad".to_string(),
                values: vec![None, Some(71.0)],
            }],
        };
        let chart = Chart::Comparison(ComparisonChart::from(&series));
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["title"], "Demand Comparison");
        assert!(json["datasets"][0]["data"][0].is_null());
        assert_eq!(json["datasets"][0]["data"][1], 71.0);
        assert!(json.get("data").is_none());
    }
}
