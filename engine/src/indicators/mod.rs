// Technical indicators module
pub mod rsi;
pub mod sma;

pub use rsi::{compute_rsi, Rsi, RsiZone, DEFAULT_RSI_WINDOW};
pub use sma::{rolling_mean, Sma};

use serde_json::Value;
use shared::models::{IndicatorSeries, PriceSeries};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value; // Parameters used for this indicator instance
    fn calculate(&self, series: &PriceSeries) -> IndicatorSeries;
}

pub(crate) fn to_indicator_series(
    calc: &dyn IndicatorCalculator,
    series: &PriceSeries,
    values: Vec<Option<f64>>,
) -> IndicatorSeries {
    debug_assert_eq!(values.len(), series.len());
    IndicatorSeries {
        name: calc.name().to_string(),
        parameters: calc.parameters(),
        dates: series.dates(),
        values,
    }
}
