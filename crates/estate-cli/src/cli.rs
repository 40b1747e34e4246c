//! CLI argument definitions for Estate Insight.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "estate",
    version,
    about = "Estate Insight - Ask questions about real-estate market data",
    long_about = "Answer plain-language questions about a real-estate dataset.\n\n\
                  Reads a CSV file or spreadsheet workbook with area, year, price,\n\
                  demand and size columns and reports statistics, trends and\n\
                  area comparisons."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Dataset to analyze (.csv, .xlsx, .xlsm, .xls, .xlsb or .ods).
    #[arg(
        long = "data",
        value_name = "PATH",
        env = "ESTATE_DATA_FILE",
        global = true
    )]
    pub data: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the areas present in the dataset.
    Areas(OutputArgs),

    /// Answer a question such as "Compare Wakad and Aundh demand".
    Ask(AskArgs),

    /// Show summary statistics for one area.
    Stats(StatsArgs),

    /// Write one area's rows to a CSV file.
    Export(ExportArgs),

    /// Load the dataset and report its shape and detected columns.
    Check(OutputArgs),
}

#[derive(Parser)]
pub struct OutputArgs {
    /// Output format.
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct AskArgs {
    /// The question to answer.
    #[arg(value_name = "QUERY", value_parser = parse_query)]
    pub query: String,

    /// Table excerpt rows for single-area answers.
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<usize>,

    /// Maximum number of areas suggested when none is recognized.
    #[arg(long = "suggestions", value_name = "N")]
    pub suggestions: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Area name (case-insensitive).
    #[arg(value_name = "AREA")]
    pub area: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Area name (case-insensitive).
    #[arg(value_name = "AREA")]
    pub area: String,

    /// Destination CSV file (default: <AREA>_data.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_query(raw: &str) -> Result<String, String> {
    let query = raw.trim();
    if query.is_empty() {
        Err("query must not be empty".to_string())
    } else {
        Ok(query.to_string())
    }
}
