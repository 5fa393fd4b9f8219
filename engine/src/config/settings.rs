// Engine settings, loaded as the `engine` section of the dashboard config file
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::indicators::DEFAULT_RSI_WINDOW;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub rsi_window: usize,
    pub sma_window: usize,
    pub overbought: f64,
    pub oversold: f64,
    pub cache_ttl_secs: u64,
    pub data_dir: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            rsi_window: DEFAULT_RSI_WINDOW,
            sma_window: 20,
            overbought: 70.0,
            oversold: 30.0,
            cache_ttl_secs: 300,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl EngineSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rsi_window == 0 {
            return Err(EngineError::ConfigError("rsi_window must be at least 1".to_string()));
        }
        if self.sma_window == 0 {
            return Err(EngineError::ConfigError("sma_window must be at least 1".to_string()));
        }
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.overbought) || !in_range(self.oversold) || self.oversold >= self.overbought {
            return Err(EngineError::ConfigError(format!(
                "RSI thresholds must satisfy 0 <= oversold < overbought <= 100 (got {} / {})",
                self.oversold, self.overbought
            )));
        }
        Ok(())
    }
}
