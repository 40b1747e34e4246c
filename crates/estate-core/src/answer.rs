//! Query answering: interpretation, aggregation and rendering combined.

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use estate_model::{Chart, ComparisonChart, Intent, Metric, QueryResponse, Table, TrendChart};

use crate::aggregate::Aggregator;
use crate::interpret::{interpret, mentions_demand};
use crate::narrative::{render_clarification, render_comparison, render_summary};

/// Limits applied while building a [`QueryResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptions {
    /// Table excerpt rows for single-area answers.
    pub table_limit: usize,
    /// Table excerpt rows for comparisons.
    pub comparison_table_limit: usize,
    /// Areas suggested when a query names none or an area has no data.
    pub suggestion_limit: usize,
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self {
            table_limit: 20,
            comparison_table_limit: 10,
            suggestion_limit: 5,
        }
    }
}

impl AnswerOptions {
    pub fn with_table_limit(mut self, limit: usize) -> Self {
        self.table_limit = limit;
        self
    }

    pub fn with_comparison_table_limit(mut self, limit: usize) -> Self {
        self.comparison_table_limit = limit;
        self
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }
}

/// Answers a free-text question about `table`.
///
/// Never fails: unknown areas produce a clarification and areas without
/// rows produce a data-absent narrative.
pub fn answer_query(table: &Table, query: &str, options: &AnswerOptions) -> QueryResponse {
    let span = info_span!("answer_query", query = %query, rows = table.height());
    let _guard = span.enter();

    let aggregator = Aggregator::new(table);
    let available = aggregator.available_areas();
    let interpretation = interpret(query, &available);
    debug!(
        intent = %interpretation.intent,
        areas = ?interpretation.areas,
        "query interpreted"
    );

    let mut response = QueryResponse {
        query: query.to_string(),
        intent: interpretation.intent,
        areas: interpretation.areas.clone(),
        narrative: String::new(),
        chart: None,
        table: Vec::new(),
        stats: None,
        comparison: false,
    };

    let Some(first_area) = interpretation.areas.first() else {
        response.narrative = render_clarification(&available, options.suggestion_limit);
        return response;
    };

    if interpretation.intent == Intent::Compare && interpretation.areas.len() >= 2 {
        let metric = if mentions_demand(query) {
            Metric::Demand
        } else {
            Metric::Price
        };
        let series = aggregator.compare_areas(&interpretation.areas, metric);
        let stats: Vec<_> = interpretation
            .areas
            .iter()
            .map(|area| aggregator.summary_stats(area))
            .collect();
        response.narrative = render_comparison(&interpretation.areas, metric, &stats);
        response.chart = Some(Chart::Comparison(ComparisonChart::from(&series)));
        response.table = aggregator
            .filter_by_area(first_area)
            .records(options.comparison_table_limit);
        response.comparison = true;
        return response;
    }

    let stats = aggregator.summary_stats(first_area);
    if stats.is_err() {
        debug!(area = %first_area, "no rows for area");
        response.narrative = render_summary(
            first_area,
            &stats,
            None,
            &available,
            options.suggestion_limit,
        );
        return response;
    }

    let metric = if interpretation.intent == Intent::Demand {
        Metric::Demand
    } else {
        Metric::Price
    };
    let trend = match aggregator.trend(first_area, metric) {
        Ok(trend) => Some(trend),
        Err(reason) => {
            debug!(area = %first_area, %reason, "trend unavailable");
            None
        }
    };
    response.narrative = render_summary(
        first_area,
        &stats,
        trend.as_ref(),
        &available,
        options.suggestion_limit,
    );
    response.chart = trend
        .as_ref()
        .map(|trend| Chart::Trend(TrendChart::from(trend)));
    response.table = aggregator
        .filter_by_area(first_area)
        .records(options.table_limit);
    response.stats = stats.ok();
    response
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    fn table() -> Table {
        let frame = df! {
            "Area" => &["Wakad", "Wakad", "Aundh", "Aundh", "Baner"],
            "Year" => &[2020i64, 2021, 2020, 2021, 2022],
            "Price" => &[100.0f64, 110.0, 200.0, 190.0, 300.0],
            "Demand" => &[72.0f64, 74.0, 41.0, 45.0, 20.0],
        }
        .unwrap();
        Table::from_frame(frame).unwrap()
    }

    #[test]
    fn defaults_and_builders() {
        let options = AnswerOptions::default();
        assert_eq!(options.table_limit, 20);
        assert_eq!(options.comparison_table_limit, 10);
        assert_eq!(options.suggestion_limit, 5);

        let options = options.with_table_limit(3).with_suggestion_limit(1);
        assert_eq!(options.table_limit, 3);
        assert_eq!(options.suggestion_limit, 1);
        assert_eq!(options.with_comparison_table_limit(2).comparison_table_limit, 2);
    }

    #[test]
    fn single_area_price_answer() {
        let response = answer_query(&table(), "Price trend for wakad", &AnswerOptions::default());

        assert_eq!(response.intent, Intent::Price);
        assert_eq!(response.areas, vec!["Wakad"]);
        assert!(!response.comparison);
        assert_eq!(response.table.len(), 2);
        let Some(Chart::Trend(chart)) = response.chart else {
            panic!("expected a trend chart");
        };
        assert_eq!(chart.labels, vec![2020, 2021]);
        assert_eq!(chart.data, vec![100.0, 110.0]);
        assert_eq!(chart.kind, Metric::Price);
        assert_eq!(response.stats.unwrap().growth_pct(), Some(10.0));
    }

    #[test]
    fn demand_intent_charts_demand() {
        let response = answer_query(&table(), "Demand in Aundh", &AnswerOptions::default());
        let Some(Chart::Trend(chart)) = response.chart else {
            panic!("expected a trend chart");
        };
        assert_eq!(chart.kind, Metric::Demand);
        assert_eq!(chart.title, "Demand Trend for Aundh");
    }

    #[test]
    fn comparison_answer() {
        let options = AnswerOptions::default().with_comparison_table_limit(1);
        let response = answer_query(&table(), "Compare Wakad and Aundh demand", &options);

        assert!(response.comparison);
        assert_eq!(response.areas, vec!["Aundh", "Wakad"]);
        assert!(response.stats.is_none());
        assert_eq!(response.table.len(), 1);
        let Some(Chart::Comparison(chart)) = response.chart else {
            panic!("expected a comparison chart");
        };
        assert_eq!(chart.title, "Demand Comparison");
        assert_eq!(chart.datasets.len(), 2);
        assert!(response.narrative.starts_with("# 📊 Comparison: Aundh vs Wakad"));
    }

    #[test]
    fn compare_with_one_area_falls_back_to_single_area() {
        let response = answer_query(&table(), "compare Baner", &AnswerOptions::default());
        assert_eq!(response.intent, Intent::Compare);
        assert!(!response.comparison);
        assert!(response.stats.is_some());
    }

    #[test]
    fn unknown_area_asks_for_clarification() {
        let response = answer_query(&table(), "What about demand?", &AnswerOptions::default());
        assert!(response.areas.is_empty());
        assert!(response.chart.is_none());
        assert!(response.table.is_empty());
        assert!(response.narrative.starts_with("❓"));
    }
}
