//! End-to-end tests for query answering.

use polars::df;

use estate_core::{
    AnswerOptions, answer_query, available_areas, compare_areas, render_summary, summary_stats,
};
use estate_model::{Chart, DemandLevel, Intent, Metric, Table};

fn test_table() -> Table {
    let frame = df! {
        "Area" => &[
            "Wakad", "Wakad", "Aundh", "Aundh", "Baner", "Baner",
            "Hinjewadi", "Kothrud", "Pimple Saudagar", "Viman Nagar",
        ],
        "Year" => &[2020i64, 2021, 2018, 2019, 2020, 2021, 2020, 2020, 2020, 2020],
        "Price" => &[
            100.0f64, 110.0, 8000.0, 8400.0, 5000.0, 5600.0, 4000.0, 9000.0, 6000.0, 7000.0,
        ],
        "Demand" => &[60.0f64, 62.0, 45.0, 47.0, 80.0, 70.0, 30.0, 55.0, 65.0, 50.0],
        "Unit Size" => &[900.0f64, 950.0, 1200.0, 1250.0, 1000.0, 1100.0, 800.0, 1400.0, 1000.0, 1300.0],
    }
    .unwrap();
    Table::from_frame(frame).unwrap()
}

#[test]
fn growth_over_two_years_is_exact() {
    let stats = summary_stats(&test_table(), "Wakad").unwrap();
    assert_eq!(stats.growth_pct(), Some(10.0));
}

#[test]
fn demand_tier_boundaries() {
    assert_eq!(DemandLevel::from_index(70.0), DemandLevel::High);
    assert_eq!(DemandLevel::from_index(69.99), DemandLevel::Moderate);
    assert_eq!(DemandLevel::from_index(40.0), DemandLevel::Moderate);
    assert_eq!(DemandLevel::from_index(39.99), DemandLevel::Low);
}

#[test]
fn compare_lists_areas_in_known_order() {
    let response = answer_query(
        &test_table(),
        "Compare Wakad and Aundh",
        &AnswerOptions::default(),
    );
    assert_eq!(response.intent, Intent::Compare);
    assert_eq!(response.areas, vec!["Aundh", "Wakad"]);
    assert!(response.comparison);
    assert!(
        response
            .narrative
            .contains("**Comparing price trends across 2 areas:**")
    );
}

#[test]
fn query_without_known_area_needs_clarification() {
    let response = answer_query(
        &test_table(),
        "Compare demand and price growth",
        &AnswerOptions::default(),
    );
    assert!(response.areas.is_empty());
    assert!(response.chart.is_none());
    assert!(response.table.is_empty());
    assert!(response.stats.is_none());
    assert!(
        response
            .narrative
            .contains("**Available areas:** Aundh, Baner, Hinjewadi, Kothrud, Pimple Saudagar...")
    );
}

#[test]
fn missing_area_suggests_at_most_five() {
    let table = test_table();
    let available = available_areas(&table);
    assert_eq!(available.len(), 7);

    let stats = summary_stats(&table, "Pune");
    assert!(stats.is_err());
    let text = render_summary("Pune", &stats, None, &available, 5);
    let suggestions = text.rsplit("Available areas: ").next().unwrap();
    assert_eq!(
        suggestions,
        "Aundh, Baner, Hinjewadi, Kothrud, Pimple Saudagar..."
    );
}

#[test]
fn disjoint_years_are_unioned() {
    let areas = vec!["Wakad".to_string(), "Aundh".to_string()];
    let series = compare_areas(&test_table(), &areas, Metric::Price);

    assert_eq!(series.labels, vec![2018, 2019, 2020, 2021]);
    assert_eq!(series.series[0].values, vec![None, None, Some(100.0), Some(110.0)]);
    assert_eq!(
        series.series[1].values,
        vec![Some(8000.0), Some(8400.0), None, None]
    );
}

#[test]
fn rendering_is_deterministic() {
    let table = test_table();
    let options = AnswerOptions::default();
    let first = answer_query(&table, "Analyze Baner", &options);
    let second = answer_query(&table, "Analyze Baner", &options);
    assert_eq!(first, second);
}

#[test]
fn comparison_chart_serializes_with_datasets() {
    let response = answer_query(
        &test_table(),
        "Wakad versus Baner demand",
        &AnswerOptions::default(),
    );
    let Some(chart @ Chart::Comparison(_)) = &response.chart else {
        panic!("expected a comparison chart");
    };
    let json = serde_json::to_value(chart).unwrap();
    assert_eq!(json["title"], "Demand Comparison");
    assert_eq!(json["labels"], serde_json::json!([2020, 2021]));
    assert_eq!(json["datasets"][0]["label"], "Baner");
    assert_eq!(json["datasets"][1]["data"], serde_json::json!([60.0, 62.0]));
}

#[test]
fn single_area_analysis_narrative() {
    let response = answer_query(&test_table(), "Analyze Baner", &AnswerOptions::default());

    assert_eq!(response.intent, Intent::Analysis);
    assert_eq!(response.table.len(), 2);
    insta::assert_snapshot!(response.narrative.trim_end(), @r"
    # 📊 Real Estate Analysis for Baner

    **Analysis based on 2 records** (2020-2021)

    ## 💰 Price Analysis
    • **Average Price:** ₹5,300
    • **Price Range:** ₹5,000 - ₹5,600
    • **Growth Trend:** 📈 Prices have increased by **12.00%**

    ## 📈 Demand Analysis
    • **Demand Level:** 🔥 High (Index: 75.00)
    • **Demand Range:** 70.00 - 80.00

    **Average Property Size:** 1050 sq ft

    ## 💡 Key Insights
    ✅ **Baner** shows strong growth potential with 12.0% price appreciation.
    🔥 High demand indicates strong market activity and investment interest.
    📊 Price trend covers 2 years (2020-2021).
    ");
}
