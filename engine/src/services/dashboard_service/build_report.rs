// Builds the per-ticker report: fetch, then derive RSI, SMA and the range insight.
use crate::config::EngineSettings;
use crate::data::{PriceRequest, PriceSource};
use crate::error::Result;
use crate::indicators::{compute_rsi, IndicatorCalculator, RsiZone, Sma};
use crate::insights::summarize;

use super::{ReadyReport, RsiReading, TickerReport};

pub async fn handle_build_report<S: PriceSource + ?Sized>(
    source: &S,
    settings: &EngineSettings,
    request: &PriceRequest,
) -> Result<TickerReport> {
    tracing::debug!(ticker = %request.ticker, start = %request.start, end = %request.end, "Building ticker report");

    let series = source.fetch(request).await?;
    if series.is_empty() {
        tracing::warn!(ticker = %request.ticker, start = %request.start, end = %request.end, "No price data for ticker in range");
        return Ok(TickerReport::NoData {
            ticker: request.ticker.clone(),
        });
    }

    // Both derive from the same series and do not depend on each other.
    let rsi = compute_rsi(&series, settings.rsi_window)?;
    let sma = Sma::new(settings.sma_window)?.calculate(&series);
    let insight = summarize(&series);

    let rsi_reading = rsi.latest().map(|(date, value)| RsiReading {
        date,
        value,
        zone: RsiZone::classify(value, settings.overbought, settings.oversold),
    });

    tracing::info!(
        ticker = %request.ticker,
        bars = series.len(),
        latest_rsi = ?rsi_reading.as_ref().map(|r| r.value),
        "Ticker report ready"
    );

    Ok(TickerReport::Ready(Box::new(ReadyReport {
        request: request.clone(),
        series,
        rsi,
        sma,
        insight,
        rsi_reading,
    })))
}
