//! Query interpretation results and the assembled response.

use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::stats::SummaryStats;
use crate::table::Record;

/// What a query is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Compare,
    Demand,
    Price,
    Analysis,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Compare => "compare",
            Intent::Demand => "demand",
            Intent::Price => "price",
            Intent::Analysis => "analysis",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intent plus the known areas a query mentions, in known-area order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub intent: Intent,
    pub areas: Vec<String>,
}

/// Everything returned for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub intent: Intent,
    pub areas: Vec<String>,
    pub narrative: String,
    pub chart: Option<Chart>,
    pub table: Vec<Record>,
    pub stats: Option<SummaryStats>,
    pub comparison: bool,
}
