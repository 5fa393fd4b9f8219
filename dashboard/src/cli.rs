use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Terminal stock dashboard: price insight and RSI per ticker")]
pub struct Cli {
    /// Path to a JSON config file (defaults to the embedded configuration)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comma-separated list of tickers (e.g. "AAPL,TSLA")
    #[arg(short, long)]
    pub tickers: Option<String>,

    /// Start date, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// End date (exclusive), YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub end: Option<String>,

    /// Directory holding <TICKER>.csv files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Show the recent data table
    #[arg(long, conflicts_with = "no_beginner")]
    pub beginner: bool,

    /// Hide the recent data table
    #[arg(long)]
    pub no_beginner: bool,

    /// Rows in the recent data table
    #[arg(long)]
    pub recent_rows: Option<usize>,

    /// Write <TICKER>_data.csv files (with an RSI column) into this directory
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Print the glossary before the report
    #[arg(long)]
    pub glossary: bool,
}

impl Cli {
    /// `Some(true)` / `Some(false)` when a beginner flag was given.
    pub fn beginner_mode(&self) -> Option<bool> {
        match (self.beginner, self.no_beginner) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
