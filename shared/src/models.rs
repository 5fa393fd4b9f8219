use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Daily bars for one ticker, strictly increasing by date.
///
/// An empty series is valid and means the source had no data for the
/// requested ticker and range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PriceSeriesData")]
pub struct PriceSeries {
    pub ticker: String,
    bars: Vec<PriceBar>,
}

// Deserialized shape; goes through `PriceSeries::new` so ordering holds.
#[derive(Deserialize)]
struct PriceSeriesData {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl From<PriceSeriesData> for PriceSeries {
    fn from(data: PriceSeriesData) -> Self {
        PriceSeries::new(data.ticker, data.bars)
    }
}

impl PriceSeries {
    /// Builds a series, sorting by date and keeping the first bar seen for each date.
    pub fn new(ticker: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        // Stable sort so that, among duplicates, the bar that came first survives dedup.
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    pub fn empty(ticker: impl Into<String>) -> Self {
        Self::new(ticker, Vec::new())
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// The last `n` bars (or all of them when the series is shorter).
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    /// Bars with `start <= date <= end`.
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> PriceSeries {
        let bars = self
            .bars
            .iter()
            .filter(|b| b.date >= start && b.date <= end)
            .cloned()
            .collect();
        PriceSeries {
            ticker: self.ticker.clone(),
            bars,
        }
    }
}

/// Indicator output aligned one-to-one with the series it was computed from.
/// `None` marks positions without enough history (or otherwise undefined).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub name: String,
    pub parameters: serde_json::Value,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent defined value together with its date.
    pub fn latest(&self) -> Option<(NaiveDate, f64)> {
        self.dates
            .iter()
            .zip(self.values.iter())
            .rev()
            .find_map(|(d, v)| v.map(|v| (*d, v)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Change and average over the requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub direction: Direction,
    pub percent_change: f64,
    pub average_close: f64,
    pub start_close: f64,
    pub end_close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoDataReason {
    /// Fewer than two bars.
    InsufficientHistory,
    /// First close is zero, so a percent change is meaningless.
    ZeroStartPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Insight {
    Summary(InsightSummary),
    NoData(NoDataReason),
}

impl Insight {
    pub fn summary(&self) -> Option<&InsightSummary> {
        match self {
            Insight::Summary(s) => Some(s),
            Insight::NoData(_) => None,
        }
    }
}
