// engine/src/services/dashboard_service/mod.rs
// DashboardService turns ticker requests into reports. Each ticker is fetched
// and derived on its own; nothing is shared between iterations except the source.

use chrono::NaiveDate;
use shared::models::{Direction, IndicatorSeries, Insight, PriceSeries};

use crate::config::EngineSettings;
use crate::data::{PriceRequest, PriceSource};
use crate::error::Result;
use crate::indicators::RsiZone;

pub mod build_report;
pub mod comparison;

#[derive(Debug, Clone, PartialEq)]
pub struct RsiReading {
    pub date: NaiveDate,
    pub value: f64,
    pub zone: RsiZone,
}

#[derive(Debug, Clone)]
pub struct ReadyReport {
    pub request: PriceRequest,
    pub series: PriceSeries,
    pub rsi: IndicatorSeries,
    pub sma: IndicatorSeries,
    pub insight: Insight,
    pub rsi_reading: Option<RsiReading>,
}

#[derive(Debug, Clone)]
pub enum TickerReport {
    Ready(Box<ReadyReport>),
    /// The source returned no bars for the ticker and range.
    NoData { ticker: String },
}

#[derive(Debug)]
pub enum TickerOutcome {
    Report(TickerReport),
    Failed { ticker: String, error: String },
}

impl TickerOutcome {
    pub fn ticker(&self) -> &str {
        match self {
            TickerOutcome::Report(TickerReport::Ready(r)) => &r.request.ticker,
            TickerOutcome::Report(TickerReport::NoData { ticker }) => ticker,
            TickerOutcome::Failed { ticker, .. } => ticker,
        }
    }

    pub fn ready(&self) -> Option<&ReadyReport> {
        match self {
            TickerOutcome::Report(TickerReport::Ready(r)) => Some(&**r),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub ticker: String,
    pub start_close: f64,
    pub end_close: f64,
    pub percent_change: f64,
    pub direction: Direction,
}

pub struct DashboardService<S> {
    source: S,
    settings: EngineSettings,
}

impl<S: PriceSource> DashboardService<S> {
    pub fn new(source: S, settings: EngineSettings) -> Result<Self> {
        settings.validate()?;
        Ok(DashboardService { source, settings })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub async fn build_report(&self, request: &PriceRequest) -> Result<TickerReport> {
        build_report::handle_build_report(&self.source, &self.settings, request).await
    }

    /// Builds reports in request order. A failing ticker is logged and recorded;
    /// the remaining tickers are still processed.
    pub async fn build_reports(&self, requests: &[PriceRequest]) -> Vec<TickerOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());
        for request in requests {
            let outcome = match self.build_report(request).await {
                Ok(report) => TickerOutcome::Report(report),
                Err(e) => {
                    tracing::error!(ticker = %request.ticker, error_detail = ?e, "Failed to build ticker report");
                    TickerOutcome::Failed {
                        ticker: request.ticker.clone(),
                        error: e.to_string(),
                    }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    pub fn comparison(&self, outcomes: &[TickerOutcome]) -> Vec<ComparisonRow> {
        comparison::compare(outcomes)
    }
}
