// Relative Strength Index (RSI) indicator implementation
use super::{rolling_mean, to_indicator_series, IndicatorCalculator};
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{IndicatorSeries, PriceSeries};

pub const DEFAULT_RSI_WINDOW: usize = 14;

/// RSI over `window` trailing close-to-close changes.
///
/// Average gain and average loss are simple moving averages, so the first
/// defined value sits at index `window`; earlier entries are `None`.
///
/// When the window has no losses the RSI is `100.0`. When it has neither gains
/// nor losses (the price did not move at all) the value is `None`.
pub fn compute_rsi(series: &PriceSeries, window: usize) -> Result<IndicatorSeries> {
    Ok(Rsi::new(window)?.calculate(series))
}

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(EngineError::IndicatorError("RSI period must be greater than 0".to_string()));
        }
        Ok(Self {
            name: format!("RSI({})", period),
            period,
        })
    }

    fn values(&self, closes: &[f64]) -> Vec<Option<f64>> {
        if closes.len() <= self.period {
            return vec![None; closes.len()];
        }

        let mut gains = Vec::with_capacity(closes.len());
        let mut losses = Vec::with_capacity(closes.len());
        gains.push(None); // no change for the first bar
        losses.push(None);
        for pair in closes.windows(2) {
            let change = pair[1] - pair[0];
            gains.push(Some(change.max(0.0)));
            losses.push(Some((-change).max(0.0)));
        }

        let avg_gains = rolling_mean(&gains, self.period);
        let avg_losses = rolling_mean(&losses, self.period);

        avg_gains
            .into_iter()
            .zip(avg_losses)
            .map(|(gain, loss)| match (gain, loss) {
                (Some(g), Some(l)) => rsi_from_averages(g, l),
                _ => None,
            })
            .collect()
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, series: &PriceSeries) -> IndicatorSeries {
        let values = self.values(&series.closes());
        to_indicator_series(self, series, values)
    }
}

/// Where an RSI reading sits relative to the overbought/oversold lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn classify(value: f64, overbought: f64, oversold: f64) -> Self {
        if value >= overbought {
            RsiZone::Overbought
        } else if value <= oversold {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "overbought",
            RsiZone::Oversold => "oversold",
            RsiZone::Neutral => "neutral",
        }
    }
}
