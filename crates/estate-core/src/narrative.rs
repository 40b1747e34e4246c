//! Markdown narratives for analysis, comparison and clarification replies.
//!
//! Output is a pure function of its inputs: the same statistics always render
//! to the same bytes.

use estate_common::format_grouped;
use estate_model::{
    DemandLevel, DemandStats, GrowthDirection, GrowthOutlook, Metric, NoDataForArea, PriceStats,
    SummaryStats, Trend,
};

/// Renders the single-area report, or the data-absent message when
/// `stats` is an error.
///
/// `available_areas` and `suggestion_limit` only feed the data-absent
/// message.
pub fn render_summary(
    area: &str,
    stats: &Result<SummaryStats, NoDataForArea>,
    trend: Option<&Trend>,
    available_areas: &[String],
    suggestion_limit: usize,
) -> String {
    match stats {
        Ok(stats) => render_analysis(area, stats, trend),
        Err(_) => render_no_data(area, available_areas, suggestion_limit),
    }
}

/// Message for an area without rows, with up to `limit` suggestions.
pub fn render_no_data(area: &str, available_areas: &[String], limit: usize) -> String {
    format!(
        "❌ I couldn't find any data for **{area}**. Please check the spelling or try another area.\n\nAvailable areas: {}",
        suggestion_list(available_areas, limit)
    )
}

/// Reply for a query that names no known area.
pub fn render_clarification(available_areas: &[String], limit: usize) -> String {
    let first = available_areas.first().map_or("Wakad", String::as_str);
    let second = available_areas
        .get(1)
        .or(available_areas.first())
        .map_or("Aundh", String::as_str);
    format!(
        "❓ I couldn't identify any area in your query.\n\n**Available areas:** {}\n\nPlease try asking about a specific area like 'Analyze {first}' or 'Show me price trends for {second}'.",
        suggestion_list(available_areas, limit)
    )
}

/// Full report for one area.
pub fn render_analysis(area: &str, stats: &SummaryStats, trend: Option<&Trend>) -> String {
    let mut text = format!(
        "# 📊 Real Estate Analysis for {area}\n\n**Analysis based on {} records**",
        stats.total_records
    );
    if let Some(years) = stats.years_analyzed() {
        text.push_str(&format!(" ({years})"));
    }
    text.push_str("\n\n");

    if let Some(price) = &stats.price {
        push_price_section(&mut text, price);
    }
    if let Some(demand) = &stats.demand {
        push_demand_section(&mut text, demand);
    }
    if let Some(size) = stats.avg_size {
        text.push_str(&format!("**Average Property Size:** {size:.0} sq ft\n\n"));
    }

    text.push_str("## 💡 Key Insights\n");
    if let Some(growth) = stats.growth_pct() {
        match GrowthOutlook::from_percent(growth) {
            GrowthOutlook::Strong => text.push_str(&format!(
                "✅ **{area}** shows strong growth potential with {growth:.1}% price appreciation.\n"
            )),
            GrowthOutlook::Steady => text.push_str(&format!(
                "✅ **{area}** shows steady growth with {growth:.1}% price increase.\n"
            )),
            GrowthOutlook::Decline => text.push_str(&format!(
                "⚠️ **{area}** has experienced a price decline of {:.1}%.\n",
                growth.abs()
            )),
        }
    }
    match stats.demand.as_ref().map(DemandStats::level) {
        Some(DemandLevel::High) => text.push_str(
            "🔥 High demand indicates strong market activity and investment interest.\n",
        ),
        Some(DemandLevel::Moderate) => {
            text.push_str("⚡ Moderate demand suggests stable market conditions.\n");
        }
        Some(DemandLevel::Low) | None => {}
    }
    if let Some(trend) = trend.filter(|trend| trend.points.len() >= 2) {
        let years = trend.years();
        if let (Some(first), Some(last)) = (years.first(), years.last()) {
            text.push_str(&format!(
                "📊 {} trend covers {} years ({first}-{last}).\n",
                trend.metric.title(),
                years.len()
            ));
        }
    }
    text
}

/// Comparison report. Areas whose statistics are an error are skipped.
pub fn render_comparison(
    areas: &[String],
    metric: Metric,
    stats: &[Result<SummaryStats, NoDataForArea>],
) -> String {
    let mut text = format!(
        "# 📊 Comparison: {}\n\n**Comparing {metric} trends across {} areas:**\n\n",
        areas.join(" vs "),
        areas.len()
    );
    for stats in stats.iter().flatten() {
        text.push_str(&format!("## 📍 {}\n", stats.area));
        match metric {
            Metric::Price => {
                if let Some(price) = &stats.price {
                    text.push_str(&format!("• Average Price: ₹{}\n", format_grouped(price.avg)));
                    if let Some(growth) = price.growth_pct {
                        let emoji = if growth > 0.0 { "📈" } else { "📉" };
                        text.push_str(&format!("• Growth: {emoji} {growth:.2}%\n"));
                    }
                }
            }
            Metric::Demand => {
                if let Some(demand) = &stats.demand {
                    let emoji = match demand.level() {
                        DemandLevel::High => "🔥",
                        DemandLevel::Moderate | DemandLevel::Low => "⚡",
                    };
                    text.push_str(&format!("• Demand Index: {emoji} {:.2}\n", demand.avg));
                }
            }
        }
        text.push('\n');
    }
    text
}

fn push_price_section(text: &mut String, price: &PriceStats) {
    text.push_str("## 💰 Price Analysis\n");
    text.push_str(&format!(
        "• **Average Price:** ₹{}\n",
        format_grouped(price.avg)
    ));
    text.push_str(&format!(
        "• **Price Range:** ₹{} - ₹{}\n",
        format_grouped(price.min),
        format_grouped(price.max)
    ));
    if let Some(growth) = price.growth_pct {
        let direction = GrowthDirection::from_percent(growth);
        text.push_str(&format!(
            "• **Growth Trend:** {} Prices have {} by **{:.2}%**\n",
            direction.emoji(),
            direction.verb(),
            growth.abs()
        ));
    }
    text.push('\n');
}

fn push_demand_section(text: &mut String, demand: &DemandStats) {
    let level = demand.level();
    text.push_str("## 📈 Demand Analysis\n");
    text.push_str(&format!(
        "• **Demand Level:** {} {} (Index: {:.2})\n",
        level.emoji(),
        level.label(),
        demand.avg
    ));
    text.push_str(&format!(
        "• **Demand Range:** {:.2} - {:.2}\n\n",
        demand.min, demand.max
    ));
}

fn suggestion_list(available_areas: &[String], limit: usize) -> String {
    if available_areas.is_empty() || limit == 0 {
        return "none".to_string();
    }
    let shown = &available_areas[..available_areas.len().min(limit)];
    let mut list = shown.join(", ");
    if shown.len() < available_areas.len() {
        list.push_str("...");
    }
    list
}
