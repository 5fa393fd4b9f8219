use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use shared::models::{PriceBar, PriceSeries};
use std::io::Read;
use std::path::Path;
use std::fs::File;
use std::io::BufReader;

use crate::error::{EngineError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Parsing of individual fields of a daily export row.
pub mod daily_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use std::str::FromStr;

    /// Decimal with `.` as separator. Empty and `null` cells are treated as missing.
    pub fn parse_decimal(s: &str) -> Result<Option<f64>, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            return Ok(None);
        }
        f64::from_str(trimmed)
            .map(Some)
            .map_err(|e| format!("Failed to parse decimal '{}': {}", s, e))
    }

    pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_err(|e| format!("Failed to parse date '{}': {}", s, e))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_decimal() {
            assert_eq!(parse_decimal("123.45").unwrap(), Some(123.45));
            assert_eq!(parse_decimal(" 7 ").unwrap(), Some(7.0));
            assert_eq!(parse_decimal("null").unwrap(), None);
            assert_eq!(parse_decimal("").unwrap(), None);
            assert!(parse_decimal("1,5").is_err());
        }

        #[test]
        fn test_parse_date() {
            assert_eq!(parse_date("2024-12-30").unwrap(), NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
            assert!(parse_date("30/12/2024").is_err());
            assert!(parse_date("2024-02-30").is_err());
        }
    }
}

/// Reader for daily OHLC exports with a `Date,Open,High,Low,Close[,Adj Close],Volume` header.
///
/// Columns are looked up by header name, so their order does not matter and
/// extra columns are ignored. `Volume` is optional. Rows whose prices are
/// `null` (non-trading days in some exports) are skipped.
pub struct DailyCsvParser;

impl DailyCsvParser {
    pub fn load_series_from_csv(file_path: &Path, ticker: &str) -> Result<PriceSeries> {
        let file = File::open(file_path)?;
        Self::load_series_from_reader(BufReader::new(file), ticker)
    }

    pub fn load_series_from_reader<R: Read>(reader: R, ticker: &str) -> Result<PriceSeries> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut bars = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2; // 1-based, after the header
            let record = result?;

            let date_str = Self::required_field(&record, &headers, "Date", line)?;
            let date = daily_format::parse_date(date_str)
                .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing 'Date' at line {}: {}", line, e)))?;

            let open = Self::price_field(&record, &headers, "Open", line)?;
            let high = Self::price_field(&record, &headers, "High", line)?;
            let low = Self::price_field(&record, &headers, "Low", line)?;
            let close = Self::price_field(&record, &headers, "Close", line)?;

            let (open, high, low, close) = match (open, high, low, close) {
                (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
                _ => {
                    tracing::debug!(ticker, line, %date, "Skipping row with missing prices");
                    continue;
                }
            };

            let volume = match Self::get_field(&record, &headers, "Volume") {
                Some(raw) => daily_format::parse_decimal(raw)
                    .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing 'Volume' at line {}: {}", line, e)))?
                    .unwrap_or(0.0),
                None => 0.0,
            };

            bars.push(PriceBar { date, open, high, low, close, volume });
        }

        let series = PriceSeries::new(ticker, bars);
        tracing::debug!(ticker, count = series.len(), "Loaded daily bars from CSV");
        Ok(series)
    }

    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
    }

    fn required_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str> {
        Self::get_field(record, headers, name)
            .ok_or_else(|| EngineError::CsvDataFormatError(format!("Missing '{}' field in CSV record at line {}", name, line)))
    }

    fn price_field(record: &StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<Option<f64>> {
        let raw = Self::required_field(record, headers, name, line)?;
        let value = daily_format::parse_decimal(raw)
            .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e)))?;
        // Zero is let through; a zero first close is reported as an insight, not a load error.
        match value {
            Some(v) if !v.is_finite() || v < 0.0 => Err(EngineError::CsvDataFormatError(format!(
                "Invalid '{}' at line {}: {} is not a valid price",
                name, line, raw
            ))),
            other => Ok(other),
        }
    }
}

/// Parses a date the way the CSV reader does, for callers outside the parser.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    daily_format::parse_date(s).map_err(EngineError::ConfigError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_series_valid_data() {
        let csv_content = "\
Date,Open,High,Low,Close,Adj Close,Volume
2023-01-04,126.89,128.66,125.08,126.36,125.66,89113600
2023-01-03,130.28,130.90,124.17,125.07,124.38,112117500";
        let tmp_file = create_test_csv(csv_content);
        let series = DailyCsvParser::load_series_from_csv(tmp_file.path(), "AAPL").unwrap();

        assert_eq!(series.ticker, "AAPL");
        assert_eq!(series.len(), 2);
        let first = series.first().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
        assert_eq!(first.open, 130.28);
        assert_eq!(first.close, 125.07);
        assert_eq!(first.volume, 112117500.0);
        assert_eq!(series.last().unwrap().close, 126.36);
    }

    #[test]
    fn test_load_series_reordered_columns_without_volume() {
        let csv_content = "\
Close,Date,Low,High,Open
10.5,2024-03-01,10,11,10.2";
        let tmp_file = create_test_csv(csv_content);
        let series = DailyCsvParser::load_series_from_csv(tmp_file.path(), "XYZ").unwrap();
        let bar = series.first().unwrap();
        assert_eq!(bar.close, 10.5);
        assert_eq!(bar.open, 10.2);
        assert_eq!(bar.volume, 0.0);
    }

    #[test]
    fn test_load_series_header_only() {
        let tmp_file = create_test_csv("Date,Open,High,Low,Close,Volume");
        let series = DailyCsvParser::load_series_from_csv(tmp_file.path(), "AAPL").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_load_series_skips_null_rows() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume
2023-01-02,null,null,null,null,null
2023-01-03,1,1,1,1,5";
        let tmp_file = create_test_csv(csv_content);
        let series = DailyCsvParser::load_series_from_csv(tmp_file.path(), "AAPL").unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_load_series_missing_field() {
        let csv_content = "\
Date,Open,High,Low,Volume
2023-01-03,1,1,1,5";
        let tmp_file = create_test_csv(csv_content);
        let err = DailyCsvParser::load_series_from_csv(tmp_file.path(), "AAPL").unwrap_err();
        assert!(err.to_string().contains("Missing 'Close' field"), "{}", err);
    }

    #[test]
    fn test_load_series_invalid_number() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume
2023-01-03,abc,1,1,1,5";
        let tmp_file = create_test_csv(csv_content);
        let err = DailyCsvParser::load_series_from_csv(tmp_file.path(), "AAPL").unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
        assert!(err.to_string().contains("Error parsing 'Open' at line 2"), "{}", err);
    }

    #[test]
    fn test_load_series_rejects_invalid_prices() {
        for bad in ["NaN", "inf", "-5"] {
            let csv_content = format!(
                "Date,Open,High,Low,Close,Volume\n2023-01-03,10,10,10,10,5\n2023-01-04,10,10,10,{},5",
                bad
            );
            let err = DailyCsvParser::load_series_from_reader(csv_content.as_bytes(), "AAPL").unwrap_err();
            assert!(matches!(err, EngineError::CsvDataFormatError(_)), "{}: {}", bad, err);
            assert!(err.to_string().contains("Invalid 'Close' at line 3"), "{}", err);
        }
    }

    #[test]
    fn test_load_series_zero_close_is_kept() {
        let csv_content = "Date,Open,High,Low,Close\n2023-01-03,0,0,0,0";
        let series = DailyCsvParser::load_series_from_reader(csv_content.as_bytes(), "AAPL").unwrap();
        assert_eq!(series.closes(), vec![0.0]);
    }

    #[test]
    fn test_load_series_ragged_row_is_csv_error() {
        let csv_content = "\
Date,Open,High,Low,Close,Volume
2023-01-03,1,1";
        let tmp_file = create_test_csv(csv_content);
        let err = DailyCsvParser::load_series_from_csv(tmp_file.path(), "AAPL").unwrap_err();
        assert!(matches!(err, EngineError::CsvSystemError { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DailyCsvParser::load_series_from_csv(Path::new("no/such/file.csv"), "AAPL").unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }
}
