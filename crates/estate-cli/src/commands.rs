use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde_json::json;
use tracing::{info, info_span};

use estate_cli::report::{
    DatasetCheck, areas_table, chart_table, check_table, records_table, stats_table,
};
use estate_core::{
    AnswerOptions, answer_query, available_areas, filter_by_area, render_no_data, summary_stats,
};
use estate_ingest::{FileTableSource, TableSource, write_csv};
use estate_model::{NoDataForArea, Table};

use crate::cli::{AskArgs, ExportArgs, OutputArgs, OutputFormatArg, StatsArgs};

/// Suggestions shown when `stats` is asked about an unknown area.
const STATS_SUGGESTIONS: usize = 5;

pub fn dataset_path(data: Option<&Path>) -> Result<&Path> {
    data.ok_or_else(|| anyhow!("no dataset given; pass --data <PATH> or set ESTATE_DATA_FILE"))
}

pub fn load_table(path: &Path) -> Result<Table> {
    let span = info_span!("load", path = %path.display());
    let _guard = span.enter();
    FileTableSource::new(path)
        .load()
        .with_context(|| format!("load dataset {}", path.display()))
}

pub fn run_areas(table: &Table, args: &OutputArgs) -> Result<()> {
    let areas = available_areas(table);
    match args.format {
        OutputFormatArg::Json => print_json(&json!({ "areas": areas, "count": areas.len() }))?,
        OutputFormatArg::Text => {
            println!("{}", areas_table(&areas));
            println!("{} areas", areas.len());
        }
    }
    Ok(())
}

pub fn run_ask(table: &Table, args: &AskArgs) -> Result<()> {
    let mut options = AnswerOptions::default();
    if let Some(rows) = args.rows {
        options = options.with_table_limit(rows);
    }
    if let Some(limit) = args.suggestions {
        options = options.with_suggestion_limit(limit);
    }
    let response = answer_query(table, &args.query, &options);
    match args.output.format {
        OutputFormatArg::Json => print_json(&response)?,
        OutputFormatArg::Text => {
            println!("{}", response.narrative);
            if let Some(chart) = &response.chart {
                println!("{}", chart_table(chart));
            }
            if !response.table.is_empty() {
                println!("{}", records_table(&response.table));
            }
        }
    }
    Ok(())
}

/// Returns `false` when the area has no rows.
pub fn run_stats(table: &Table, args: &StatsArgs) -> Result<bool> {
    match summary_stats(table, &args.area) {
        Ok(stats) => {
            match args.output.format {
                OutputFormatArg::Json => print_json(&stats)?,
                OutputFormatArg::Text => {
                    println!("{}", stats.area);
                    println!("{}", stats_table(&stats));
                }
            }
            Ok(true)
        }
        Err(missing) => {
            match args.output.format {
                OutputFormatArg::Json => print_json(&missing_area_json(&missing, table))?,
                OutputFormatArg::Text => println!(
                    "{}",
                    render_no_data(&args.area, &available_areas(table), STATS_SUGGESTIONS)
                ),
            }
            Ok(false)
        }
    }
}

pub fn run_export(table: &Table, args: &ExportArgs) -> Result<PathBuf> {
    let filtered = filter_by_area(table, &args.area);
    if filtered.is_empty() {
        bail!("no data found for {}", args.area);
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_export_path(&args.area));
    let rows = write_csv(&filtered, &output)
        .with_context(|| format!("export {} rows", args.area))?;
    info!(area = %args.area, rows, path = %output.display(), "area exported");
    println!("Wrote {rows} rows to {}", output.display());
    Ok(output)
}

pub fn run_check(path: &Path, table: &Table, args: &OutputArgs) -> Result<()> {
    let check = DatasetCheck::new(path, table);
    match args.format {
        OutputFormatArg::Json => print_json(&check)?,
        OutputFormatArg::Text => println!("{}", check_table(&check)),
    }
    Ok(())
}

fn missing_area_json(missing: &NoDataForArea, table: &Table) -> serde_json::Value {
    let suggestions: Vec<String> = available_areas(table)
        .into_iter()
        .take(STATS_SUGGESTIONS)
        .collect();
    json!({
        "error": missing.to_string(),
        "available_areas": suggestions,
    })
}

/// `<AREA>_data.csv` in the working directory; separators become `_`.
fn default_export_path(area: &str) -> PathBuf {
    let stem: String = area
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    PathBuf::from(format!("{stem}_data.csv"))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    #[test]
    fn default_export_path_uses_area_name() {
        assert_eq!(
            default_export_path(" Viman Nagar "),
            PathBuf::from("Viman_Nagar_data.csv")
        );
    }

    #[test]
    fn default_export_path_replaces_separators() {
        let path = default_export_path("Wakad/Hinjewadi\\Phase 1");
        assert_eq!(path, PathBuf::from("Wakad_Hinjewadi_Phase_1_data.csv"));
        assert_eq!(path.components().count(), 1);
    }

    #[test]
    fn missing_area_json_caps_suggestions() {
        let frame = df! {
            "Area" => &[
                "Aundh",
                "Baner",
                "Hinjewadi",
                "Kothrud",
                "Pimple Saudagar",
                "Viman Nagar",
                "Wakad",
            ],
            "Year" => &[2020i64; 7],
        }
        .unwrap();
        let table = Table::from_frame(frame).unwrap();

        let value = missing_area_json(&NoDataForArea::new("Hadapsar"), &table);

        assert_eq!(value["error"], "no data found for Hadapsar");
        assert_eq!(
            value["available_areas"],
            json!(["Aundh", "Baner", "Hinjewadi", "Kothrud", "Pimple Saudagar"])
        );
    }

    #[test]
    fn missing_dataset_path_is_an_error() {
        let error = dataset_path(None).unwrap_err();
        assert!(error.to_string().contains("ESTATE_DATA_FILE"));
        assert_eq!(
            dataset_path(Some(Path::new("a.csv"))).unwrap(),
            Path::new("a.csv")
        );
    }
}
