// Writes a price series (and optionally its RSI column) back out as CSV.
use csv::WriterBuilder;
use shared::models::{IndicatorSeries, PriceSeries};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::csv_parser::DATE_FORMAT;
use crate::error::{EngineError, Result};

/// `<TICKER>_data.csv`
pub fn export_file_name(ticker: &str) -> String {
    format!("{}_data.csv", ticker)
}

/// Writes `Date,Open,High,Low,Close,Volume[,RSI]`. Undefined RSI cells are left empty.
pub fn write_series_csv<W: Write>(writer: W, series: &PriceSeries, rsi: Option<&IndicatorSeries>) -> Result<()> {
    if let Some(rsi) = rsi {
        if rsi.len() != series.len() {
            return Err(EngineError::ProcessingError(format!(
                "RSI has {} values but {} has {} bars",
                rsi.len(),
                series.ticker,
                series.len()
            )));
        }
    }

    let mut wtr = WriterBuilder::new().from_writer(writer);
    let mut header = vec!["Date", "Open", "High", "Low", "Close", "Volume"];
    if rsi.is_some() {
        header.push("RSI");
    }
    wtr.write_record(&header)?;

    for (i, bar) in series.bars().iter().enumerate() {
        let mut row = vec![
            bar.date.format(DATE_FORMAT).to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ];
        if let Some(rsi) = rsi {
            row.push(rsi.values[i].map(|v| format!("{:.4}", v)).unwrap_or_default());
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the export file into `dir` and returns its path.
pub fn export_series(dir: &Path, series: &PriceSeries, rsi: Option<&IndicatorSeries>) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(&series.ticker));
    let file = File::create(&path)?;
    write_series_csv(file, series, rsi)?;
    tracing::info!(ticker = %series.ticker, path = %path.display(), rows = series.len(), "Exported series to CSV");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv_parser::DailyCsvParser;
    use crate::indicators::compute_rsi;
    use chrono::NaiveDate;
    use shared::models::PriceBar;

    fn sample_series() -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = [10.0, 11.0, 10.5, 12.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + chrono::Days::new(i as u64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 100.0,
            })
            .collect();
        PriceSeries::new("TEST", bars)
    }

    #[test]
    fn test_write_with_rsi_column() {
        let series = sample_series();
        let rsi = compute_rsi(&series, 2).unwrap();
        let mut out = Vec::new();
        write_series_csv(&mut out, &series, Some(&rsi)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Date,Open,High,Low,Close,Volume,RSI");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("2024-01-01,9.5,11,9,10,100,"));
        assert!(lines[1].ends_with(','), "undefined RSI is an empty cell: {}", lines[1]);
        // changes +1.0, -0.5 -> 100 - 100 / (1 + 2) = 66.6667
        assert!(lines[3].ends_with(",66.6667"), "{}", lines[3]);
    }

    #[test]
    fn test_written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let series = sample_series();
        let path = export_series(dir.path(), &series, None).unwrap();
        assert!(path.ends_with("TEST_data.csv"));

        let reloaded = DailyCsvParser::load_series_from_csv(&path, "TEST").unwrap();
        assert_eq!(reloaded, series);
    }

    #[test]
    fn test_misaligned_rsi_rejected() {
        let series = sample_series();
        let rsi = compute_rsi(&PriceSeries::empty("TEST"), 2).unwrap();
        let err = write_series_csv(Vec::new(), &series, Some(&rsi)).unwrap_err();
        assert!(matches!(err, EngineError::ProcessingError(_)));
    }
}
