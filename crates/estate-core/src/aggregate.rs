//! Area filtering, summary statistics and yearly trends.
//!
//! All operations read the table through a [`RoleMapping`] resolved once per
//! [`Aggregator`]. Missing columns and unknown areas surface as absent values
//! or typed "unavailable" results, never as errors.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{AnyValue, Column};
use tracing::{debug, warn};

use estate_common::{any_to_f64, any_to_string_non_empty, any_to_year};
use estate_model::{
    AreaSeries, ComparisonSeries, DemandStats, Metric, NoDataForArea, PriceStats, Role,
    RoleMapping, SummaryStats, Table, Trend, TrendPoint, TrendUnavailable, YearRange,
};

use crate::schema::resolve_table_roles;

/// Aggregations over one table.
#[derive(Debug, Clone)]
pub struct Aggregator<'a> {
    table: &'a Table,
    roles: RoleMapping,
}

impl<'a> Aggregator<'a> {
    pub fn new(table: &'a Table) -> Self {
        let roles = resolve_table_roles(table);
        debug!(
            area = ?roles.area,
            year = ?roles.year,
            price = ?roles.price,
            demand = ?roles.demand,
            size = ?roles.size,
            "resolved column roles"
        );
        Self { table, roles }
    }

    fn role_column<'t>(&self, table: &'t Table, role: Role) -> Option<&'t Column> {
        self.roles.get(role).and_then(|name| table.column(name))
    }

    /// Distinct non-empty area values, sorted ascending (case-sensitive).
    pub fn available_areas(&self) -> Vec<String> {
        let Some(column) = self.role_column(self.table, Role::Area) else {
            return Vec::new();
        };
        let areas: BTreeSet<String> = cells(column, self.table.height())
            .filter_map(any_to_string_non_empty)
            .collect();
        areas.into_iter().collect()
    }

    /// Rows whose area equals `area`, ignoring case.
    pub fn filter_by_area(&self, area: &str) -> Table {
        let Some(column) = self.role_column(self.table, Role::Area) else {
            return Table::empty();
        };
        let target = area.to_lowercase();
        let keep: Vec<bool> = cells(column, self.table.height())
            .map(|value| {
                any_to_string_non_empty(value)
                    .is_some_and(|value| value.to_lowercase() == target)
            })
            .collect();
        match self.table.filter_rows(&keep) {
            Ok(filtered) => filtered,
            Err(error) => {
                warn!(area, %error, "area filter failed");
                Table::empty()
            }
        }
    }

    /// Yearly mean of `metric` for one area.
    pub fn trend(&self, area: &str, metric: Metric) -> Result<Trend, TrendUnavailable> {
        let filtered = self.filter_by_area(area);
        if filtered.is_empty() {
            return Err(TrendUnavailable::NoRowsForArea {
                area: area.to_string(),
            });
        }
        let (Some(year), Some(value)) = (
            self.role_column(&filtered, Role::Year),
            self.role_column(&filtered, metric.role()),
        ) else {
            return Err(TrendUnavailable::MissingColumns { metric });
        };
        let points = yearly_means(year, value, filtered.height())
            .into_iter()
            .map(|(year, value)| TrendPoint { year, value })
            .collect();
        Ok(Trend {
            area: area.to_string(),
            metric,
            points,
        })
    }

    /// Trends for several areas aligned on the union of their years.
    ///
    /// Areas without rows are left out. Years an area has no data for are
    /// `None` in its series.
    pub fn compare_areas(&self, areas: &[String], metric: Metric) -> ComparisonSeries {
        if self.roles.year.is_none() || self.roles.get(metric.role()).is_none() {
            debug!(%metric, "comparison skipped: year or metric column unresolved");
            return ComparisonSeries::empty(metric);
        }
        let trends: Vec<Trend> = areas
            .iter()
            .filter_map(|area| match self.trend(area, metric) {
                Ok(trend) => Some(trend),
                Err(reason) => {
                    debug!(area = %area, %reason, "area left out of comparison");
                    None
                }
            })
            .collect();
        let labels: Vec<i64> = trends
            .iter()
            .flat_map(|trend| trend.points.iter().map(|point| point.year))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let series = trends
            .iter()
            .map(|trend| AreaSeries {
                area: trend.area.clone(),
                values: labels.iter().map(|year| trend.value_for(*year)).collect(),
            })
            .collect();
        ComparisonSeries {
            metric,
            labels,
            series,
        }
    }

    /// Summary statistics for one area.
    pub fn summary_stats(&self, area: &str) -> Result<SummaryStats, NoDataForArea> {
        let filtered = self.filter_by_area(area);
        if filtered.is_empty() {
            return Err(NoDataForArea::new(area));
        }
        let height = filtered.height();
        let price = self.role_column(&filtered, Role::Price).and_then(|price| {
            let summary = NumericSummary::of(numbers(price, height))?;
            let yearly = self
                .role_column(&filtered, Role::Year)
                .map(|year| yearly_means(year, price, height))
                .unwrap_or_default();
            let (years_analyzed, growth_pct) = growth(&yearly);
            Some(PriceStats {
                avg: summary.mean(),
                min: summary.min,
                max: summary.max,
                growth_pct,
                years_analyzed,
            })
        });
        let demand = self.role_column(&filtered, Role::Demand).and_then(|demand| {
            NumericSummary::of(numbers(demand, height)).map(|summary| DemandStats {
                avg: summary.mean(),
                min: summary.min,
                max: summary.max,
            })
        });
        let avg_size = self
            .role_column(&filtered, Role::Size)
            .and_then(|size| NumericSummary::of(numbers(size, height)))
            .map(|summary| summary.mean());
        Ok(SummaryStats {
            area: area.to_string(),
            total_records: height,
            price,
            demand,
            avg_size,
        })
    }
}

/// Distinct area values of `table`; see [`Aggregator::available_areas`].
pub fn available_areas(table: &Table) -> Vec<String> {
    Aggregator::new(table).available_areas()
}

/// See [`Aggregator::filter_by_area`].
pub fn filter_by_area(table: &Table, area: &str) -> Table {
    Aggregator::new(table).filter_by_area(area)
}

/// See [`Aggregator::trend`].
pub fn trend(table: &Table, area: &str, metric: Metric) -> Result<Trend, TrendUnavailable> {
    Aggregator::new(table).trend(area, metric)
}

/// See [`Aggregator::compare_areas`].
pub fn compare_areas(table: &Table, areas: &[String], metric: Metric) -> ComparisonSeries {
    Aggregator::new(table).compare_areas(areas, metric)
}

/// See [`Aggregator::summary_stats`].
pub fn summary_stats(table: &Table, area: &str) -> Result<SummaryStats, NoDataForArea> {
    Aggregator::new(table).summary_stats(area)
}

fn cells(column: &Column, height: usize) -> impl Iterator<Item = AnyValue<'_>> {
    (0..height).map(move |idx| column.get(idx).unwrap_or(AnyValue::Null))
}

fn numbers(column: &Column, height: usize) -> impl Iterator<Item = f64> + '_ {
    cells(column, height).filter_map(any_to_f64)
}

/// Mean of `value` per year, ascending. Rows missing either cell are skipped.
fn yearly_means(year: &Column, value: &Column, height: usize) -> Vec<(i64, f64)> {
    let mut groups: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for (year, value) in cells(year, height).zip(cells(value, height)) {
        let (Some(year), Some(value)) = (any_to_year(year), any_to_f64(value)) else {
            continue;
        };
        let entry = groups.entry(year).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(year, (sum, count))| (year, sum / count as f64))
        .collect()
}

/// Year span and percent change between the first and last yearly means.
///
/// Needs two or more years. Growth is undefined (absent) when the first
/// year's mean is zero.
fn growth(yearly: &[(i64, f64)]) -> (Option<YearRange>, Option<f64>) {
    let (Some(&(first_year, first)), Some(&(last_year, last))) = (yearly.first(), yearly.last())
    else {
        return (None, None);
    };
    if yearly.len() < 2 {
        return (None, None);
    }
    let range = YearRange {
        first: first_year,
        last: last_year,
    };
    let percent = (last - first) / first * 100.0;
    (Some(range), percent.is_finite().then_some(percent))
}

#[derive(Debug, Clone, Copy)]
struct NumericSummary {
    sum: f64,
    count: usize,
    min: f64,
    max: f64,
}

impl NumericSummary {
    fn of(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |acc: Option<Self>, value| {
            Some(match acc {
                None => Self {
                    sum: value,
                    count: 1,
                    min: value,
                    max: value,
                },
                Some(summary) => Self {
                    sum: summary.sum + value,
                    count: summary.count + 1,
                    min: summary.min.min(value),
                    max: summary.max.max(value),
                },
            })
        })
    }

    fn mean(self) -> f64 {
        self.sum / self.count as f64
    }
}
