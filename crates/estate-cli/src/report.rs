//! Terminal tables for command output.

use std::path::{Path, PathBuf};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use estate_common::format_grouped;
use estate_core::{available_areas, resolve_table_roles};
use estate_model::{Chart, Record, Role, RoleMapping, SummaryStats};

/// Shape and detected columns of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetCheck {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub roles: RoleMapping,
    pub area_count: usize,
}

impl DatasetCheck {
    pub fn new(path: &Path, table: &estate_model::Table) -> Self {
        Self {
            path: path.to_path_buf(),
            rows: table.height(),
            columns: table.column_names(),
            roles: resolve_table_roles(table),
            area_count: available_areas(table).len(),
        }
    }
}

pub fn areas_table(areas: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Area")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, area) in areas.iter().enumerate() {
        table.add_row(vec![Cell::new(idx + 1), Cell::new(area)]);
    }
    table
}

pub fn stats_table(stats: &SummaryStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Records"), Cell::new(stats.total_records)]);
    table.add_row(vec![
        Cell::new("Years analyzed"),
        optional_cell(stats.years_analyzed().map(|years| years.to_string())),
    ]);
    match &stats.price {
        Some(price) => {
            table.add_row(vec![
                Cell::new("Average price"),
                Cell::new(format!("₹{}", format_grouped(price.avg))),
            ]);
            table.add_row(vec![
                Cell::new("Price range"),
                Cell::new(format!(
                    "₹{} - ₹{}",
                    format_grouped(price.min),
                    format_grouped(price.max)
                )),
            ]);
            table.add_row(vec![
                Cell::new("Price growth"),
                growth_cell(price.growth_pct),
            ]);
        }
        None => {
            table.add_row(vec![Cell::new("Average price"), dim_cell("-")]);
        }
    }
    match &stats.demand {
        Some(demand) => {
            let level = demand.level();
            table.add_row(vec![
                Cell::new("Demand index"),
                Cell::new(format!("{:.2} ({})", demand.avg, level.label())),
            ]);
            table.add_row(vec![
                Cell::new("Demand range"),
                Cell::new(format!("{:.2} - {:.2}", demand.min, demand.max)),
            ]);
        }
        None => {
            table.add_row(vec![Cell::new("Demand index"), dim_cell("-")]);
        }
    }
    table.add_row(vec![
        Cell::new("Average size (sq ft)"),
        optional_cell(stats.avg_size.map(|size| format!("{size:.0}"))),
    ]);
    table
}

/// Year-by-series table for a chart payload.
pub fn chart_table(chart: &Chart) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    match chart {
        Chart::Trend(trend) => {
            table.set_header(vec![header_cell("Year"), header_cell(&trend.title)]);
            for (year, value) in trend.labels.iter().zip(&trend.data) {
                table.add_row(vec![Cell::new(year), Cell::new(value)]);
            }
        }
        Chart::Comparison(comparison) => {
            let mut header = vec![header_cell("Year")];
            header.extend(comparison.datasets.iter().map(|set| header_cell(&set.label)));
            table.set_header(header);
            for (idx, year) in comparison.labels.iter().enumerate() {
                let mut row = vec![Cell::new(year)];
                row.extend(comparison.datasets.iter().map(|set| {
                    optional_cell(set.data.get(idx).copied().flatten().map(|v| v.to_string()))
                }));
                table.add_row(row);
            }
        }
    }
    for idx in 1..table.column_count() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    table
}

/// Table excerpt rows, columns in record key order.
pub fn records_table(records: &[Record]) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let Some(first) = records.first() else {
        return table;
    };
    table.set_header(first.keys().map(|key| header_cell(key)).collect::<Vec<_>>());
    for record in records {
        table.add_row(
            first
                .keys()
                .map(|key| match record.get(key) {
                    Some(value) => Cell::new(value),
                    None => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

pub fn check_table(check: &DatasetCheck) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Dataset"),
        Cell::new(check.path.display()),
    ]);
    table.add_row(vec![Cell::new("Rows"), Cell::new(check.rows)]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(check.columns.len())]);
    table.add_row(vec![Cell::new("Areas"), Cell::new(check.area_count)]);
    for role in Role::ALL {
        table.add_row(vec![
            Cell::new(format!("{role} column")),
            optional_cell(check.roles.get(role).map(str::to_string)),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn growth_cell(growth: Option<f64>) -> Cell {
    match growth {
        Some(value) if value > 0.0 => Cell::new(format!("{value:+.2}%")).fg(Color::Green),
        Some(value) if value < 0.0 => Cell::new(format!("{value:+.2}%")).fg(Color::Red),
        Some(value) => Cell::new(format!("{value:.2}%")),
        None => dim_cell("-"),
    }
}

fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
