// Simple Moving Average (SMA) indicator implementation
use super::{to_indicator_series, IndicatorCalculator};
use crate::error::{EngineError, Result};
use serde_json::Value;
use shared::models::{IndicatorSeries, PriceSeries};

/// Trailing mean over `window` observations.
///
/// An output is defined only when all `window` inputs ending at that index are
/// defined; anything else is `None`. The output has the same length as the input.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut results = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return results;
    }

    // Summed per window, not as a running sum: an all-zero window must average to exactly 0.
    for (offset, slot) in values.windows(window).enumerate() {
        let sum: Option<f64> = slot.iter().copied().sum();
        results[offset + window - 1] = sum.map(|s| s / window as f64);
    }
    results
}

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(EngineError::IndicatorError("SMA period must be greater than 0".to_string()));
        }
        Ok(Self {
            name: format!("SMA({})", period),
            period,
        })
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &PriceSeries) -> IndicatorSeries {
        let closes: Vec<Option<f64>> = series.bars().iter().map(|b| Some(b.close)).collect();
        to_indicator_series(self, series, rolling_mean(&closes, self.period))
    }
}
