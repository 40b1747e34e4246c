//! Keyword-based query interpretation.

use estate_model::{Intent, Interpretation};

const COMPARE_KEYWORDS: &[&str] = &["compare", "comparison", "versus", "vs", "vs.", "compare to"];
const DEMAND_KEYWORDS: &[&str] = &["demand", "demands", "popularity"];
const PRICE_KEYWORDS: &[&str] = &["price", "cost", "growth", "appreciation", "value"];

fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| lowered.contains(*keyword))
}

/// Picks the first intent tier (compare, demand, price) with a keyword in
/// the query, falling back to [`Intent::Analysis`].
pub fn classify_intent(query: &str) -> Intent {
    let lowered = query.to_lowercase();
    if contains_any(&lowered, COMPARE_KEYWORDS) {
        Intent::Compare
    } else if contains_any(&lowered, DEMAND_KEYWORDS) {
        Intent::Demand
    } else if contains_any(&lowered, PRICE_KEYWORDS) {
        Intent::Price
    } else {
        Intent::Analysis
    }
}

/// Known areas whose name occurs in the query (ignoring case), in the order
/// of `available_areas`.
pub fn match_areas(query: &str, available_areas: &[String]) -> Vec<String> {
    let lowered = query.to_lowercase();
    available_areas
        .iter()
        .filter(|area| {
            let area = area.trim();
            !area.is_empty() && lowered.contains(&area.to_lowercase())
        })
        .cloned()
        .collect()
}

/// Whether a comparison should chart demand rather than price.
///
/// Independent of [`classify_intent`]: only the word "demand" counts.
pub fn mentions_demand(query: &str) -> bool {
    query.to_lowercase().contains("demand")
}

/// Classifies `query` and extracts the areas it names.
///
/// ```
/// use estate_core::interpret;
/// use estate_model::Intent;
///
/// let known = vec!["Aundh".to_string(), "Baner".to_string(), "Wakad".to_string()];
/// let found = interpret("Compare Wakad and Aundh", &known);
/// assert_eq!(found.intent, Intent::Compare);
/// assert_eq!(found.areas, vec!["Aundh", "Wakad"]);
/// ```
pub fn interpret(query: &str, available_areas: &[String]) -> Interpretation {
    Interpretation {
        intent: classify_intent(query),
        areas: match_areas(query, available_areas),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        ["Aundh", "Baner", "Wakad"]
            .iter()
            .map(|name| (*name).to_string())
            .collect()
    }

    #[test]
    fn compare_beats_other_tiers() {
        assert_eq!(
            classify_intent("Compare demand and price for Wakad"),
            Intent::Compare
        );
        assert_eq!(classify_intent("Wakad vs Baner"), Intent::Compare);
    }

    #[test]
    fn demand_beats_price() {
        assert_eq!(
            classify_intent("What is the demand and price in Baner?"),
            Intent::Demand
        );
        assert_eq!(classify_intent("Popularity of Aundh"), Intent::Demand);
    }

    #[test]
    fn price_keywords() {
        assert_eq!(classify_intent("Show price growth for Wakad"), Intent::Price);
        assert_eq!(classify_intent("property VALUE in Aundh"), Intent::Price);
    }

    #[test]
    fn defaults_to_analysis() {
        assert_eq!(classify_intent("Analyze Wakad"), Intent::Analysis);
        assert_eq!(classify_intent(""), Intent::Analysis);
    }

    #[test]
    fn areas_follow_known_order() {
        let found = match_areas("tell me about WAKAD and baner", &known());
        assert_eq!(found, vec!["Baner", "Wakad"]);
    }

    #[test]
    fn no_known_area_yields_empty_list() {
        let found = interpret("Compare demand across the city", &known());
        assert_eq!(found.intent, Intent::Compare);
        assert!(found.areas.is_empty());
    }

    #[test]
    fn blank_area_names_never_match() {
        let known = vec![" ".to_string(), "Baner".to_string()];
        assert_eq!(match_areas("Analyze Baner", &known), vec!["Baner"]);
    }

    #[test]
    fn demand_metric_check_is_independent() {
        assert!(mentions_demand("Compare Demand in Wakad vs Baner"));
        assert!(!mentions_demand("Compare popularity of Wakad vs Baner"));
    }
}
