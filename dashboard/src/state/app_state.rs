// Resolved session state: config file values with command-line overrides applied.
use anyhow::{bail, Context};
use chrono::NaiveDate;
use engine::config::EngineSettings;
use engine::data::csv_parser::parse_date;
use engine::data::PriceRequest;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::AppConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub tickers: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub beginner_mode: bool,
    pub recent_rows: usize,
    pub export_dir: Option<PathBuf>,
    pub show_glossary: bool,
    pub engine: EngineSettings,
}

/// Splits a comma-separated ticker list, trimming and upper-casing each entry.
pub fn parse_tickers(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}

impl AppState {
    pub fn resolve(config: &AppConfig, cli: &Cli, today: NaiveDate) -> anyhow::Result<Self> {
        let tickers = match &cli.tickers {
            Some(list) => parse_tickers(list),
            None => config.tickers.iter().flat_map(|t| parse_tickers(t)).collect(),
        };
        if tickers.is_empty() {
            bail!("no tickers given");
        }

        let start_date = match &cli.start {
            Some(s) => parse_date(s).context("invalid --start")?,
            None => config.start_date,
        };
        let end_date = match &cli.end {
            Some(s) => parse_date(s).context("invalid --end")?,
            None => config.end_date.unwrap_or(today),
        };
        if start_date >= end_date {
            bail!("start date {} must be before end date {}", start_date, end_date);
        }

        let mut engine = config.engine.clone();
        if let Some(dir) = &cli.data_dir {
            engine.data_dir = dir.clone();
        }

        Ok(AppState {
            tickers,
            start_date,
            end_date,
            beginner_mode: cli.beginner_mode().unwrap_or(config.beginner_mode),
            recent_rows: cli.recent_rows.unwrap_or(config.recent_rows),
            export_dir: cli.export_dir.clone(),
            show_glossary: cli.glossary,
            engine,
        })
    }

    /// One request per ticker, in the order the user listed them.
    pub fn requests(&self) -> anyhow::Result<Vec<PriceRequest>> {
        self.tickers
            .iter()
            .map(|t| PriceRequest::new(t, self.start_date, self.end_date).map_err(anyhow::Error::from))
            .collect()
    }
}
