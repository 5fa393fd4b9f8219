// Dashboard configuration, mirroring assets/config/default.json
use anyhow::Context;
use chrono::NaiveDate;
use engine::config::EngineSettings;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    pub tickers: Vec<String>,
    pub start_date: NaiveDate,
    /// Exclusive end of the range; `None` means today.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_beginner_mode")]
    pub beginner_mode: bool, // show the recent data table
    #[serde(default = "default_recent_rows")]
    pub recent_rows: usize,
    #[serde(default)]
    pub engine: EngineSettings,
}

fn default_beginner_mode() -> bool {
    true
}

fn default_recent_rows() -> usize {
    5
}

impl AppConfig {
    /// The configuration embedded in the binary.
    pub fn load_default() -> anyhow::Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str).context("embedded default configuration is invalid")
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&config_str).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(config_str: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(config_str)?;
        config.engine.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_loads() {
        let config = AppConfig::load_default().unwrap();
        assert_eq!(config.tickers, vec!["AAPL", "TSLA"]);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(config.end_date, None);
        assert!(config.beginner_mode);
        assert_eq!(config.recent_rows, 5);
        assert_eq!(config.engine, EngineSettings::default());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "version": "1", "tickers": ["MSFT"], "start_date": "2024-01-02" }"#).unwrap();
        assert!(config.beginner_mode);
        assert_eq!(config.engine.rsi_window, 14);
    }

    #[test]
    fn test_invalid_engine_section_rejected() {
        let err = AppConfig::from_json(
            r#"{ "version": "1", "tickers": [], "start_date": "2024-01-02", "engine": { "rsi_window": 0 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("rsi_window"));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "version": "1", "tickers": ["NVDA"], "start_date": "2024-01-02", "beginner_mode": false }}"#).unwrap();
        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.tickers, vec!["NVDA"]);
        assert!(!config.beginner_mode);

        let err = AppConfig::load_from_path(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
