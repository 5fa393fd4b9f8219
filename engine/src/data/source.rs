//! Price data sources.
//!
//! [`PriceSource`] is the seam between the dashboard and wherever daily bars
//! come from. A missing ticker is not an error: sources return an empty
//! [`PriceSeries`] and the caller decides how to tell the user.

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::PriceSeries;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::cache::{CacheKey, PriceCache};
use super::csv_parser::DailyCsvParser;
use crate::error::{EngineError, Result};

/// Daily bars for `ticker` with `start <= date < end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRequest {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PriceRequest {
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(EngineError::MarketDataError("Ticker symbol is empty".to_string()));
        }
        if start >= end {
            return Err(EngineError::MarketDataError(format!(
                "Start date {} must be before end date {} for '{}'",
                start, end, ticker
            )));
        }
        Ok(Self { ticker, start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, request: &PriceRequest) -> Result<PriceSeries>;
}

#[async_trait]
impl<S: PriceSource + ?Sized> PriceSource for Arc<S> {
    async fn fetch(&self, request: &PriceRequest) -> Result<PriceSeries> {
        (**self).fetch(request).await
    }
}

/// Reads `<dir>/<TICKER>.csv` files.
pub struct CsvDirectorySource {
    dir: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", ticker))
    }
}

#[async_trait]
impl PriceSource for CsvDirectorySource {
    async fn fetch(&self, request: &PriceRequest) -> Result<PriceSeries> {
        let path = self.path_for(&request.ticker);
        if !tokio::fs::try_exists(&path).await? {
            tracing::warn!(ticker = %request.ticker, path = %path.display(), "No CSV file for ticker");
            return Ok(PriceSeries::empty(&request.ticker));
        }

        let ticker = request.ticker.clone();
        let series = tokio::task::spawn_blocking(move || DailyCsvParser::load_series_from_csv(&path, &ticker))
            .await
            .map_err(|e| EngineError::ProcessingError(format!("CSV loader task failed: {}", e)))??;

        let bars = series
            .bars()
            .iter()
            .filter(|b| request.contains(b.date))
            .cloned()
            .collect();
        let series = PriceSeries::new(&request.ticker, bars);
        tracing::info!(
            ticker = %request.ticker,
            start = %request.start,
            end = %request.end,
            count = series.len(),
            "Loaded price series from CSV"
        );
        Ok(series)
    }
}

/// Serves repeated requests from a shared [`PriceCache`] before asking `inner`.
pub struct CachedPriceSource<S> {
    inner: S,
    cache: Arc<RwLock<PriceCache>>,
}

impl<S: PriceSource> CachedPriceSource<S> {
    pub fn new(inner: S, cache: Arc<RwLock<PriceCache>>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> Arc<RwLock<PriceCache>> {
        self.cache.clone()
    }
}

#[async_trait]
impl<S: PriceSource> PriceSource for CachedPriceSource<S> {
    async fn fetch(&self, request: &PriceRequest) -> Result<PriceSeries> {
        let key = CacheKey::from(request);

        let cached = self.cache.write().await.get(&key);
        if let Some(series) = cached {
            tracing::debug!(ticker = %request.ticker, "Price cache hit");
            return Ok(series);
        }

        // Lock is not held while the inner source runs.
        let series = self.inner.fetch(request).await?;
        {
            let mut cache = self.cache.write().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "Purged expired price cache entries");
            }
            cache.insert(key, series.clone());
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PriceSource for CountingSource {
        async fn fetch(&self, request: &PriceRequest) -> Result<PriceSeries> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PriceSeries::empty(&request.ticker))
        }
    }

    #[test]
    fn test_request_normalizes_and_validates() {
        let req = PriceRequest::new(" aapl ", d(2023, 1, 1), d(2023, 2, 1)).unwrap();
        assert_eq!(req.ticker, "AAPL");
        assert!(req.contains(d(2023, 1, 1)));
        assert!(!req.contains(d(2023, 2, 1)));

        assert!(PriceRequest::new("", d(2023, 1, 1), d(2023, 2, 1)).is_err());
        assert!(PriceRequest::new("AAPL", d(2023, 2, 1), d(2023, 2, 1)).is_err());
    }

    #[tokio::test]
    async fn test_csv_source_filters_range() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("AAPL.csv"),
            "Date,Open,High,Low,Close,Volume\n\
             2022-12-30,1,1,1,1,1\n\
             2023-01-03,2,2,2,2,1\n\
             2023-01-04,3,3,3,3,1\n\
             2023-01-05,4,4,4,4,1\n",
        )
        .unwrap();

        let source = CsvDirectorySource::new(dir.path());
        let req = PriceRequest::new("AAPL", d(2023, 1, 1), d(2023, 1, 5)).unwrap();
        let series = source.fetch(&req).await.unwrap();
        assert_eq!(series.closes(), vec![2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_csv_source_missing_ticker_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvDirectorySource::new(dir.path());
        let req = PriceRequest::new("NOPE", d(2023, 1, 1), d(2023, 2, 1)).unwrap();
        let series = source.fetch(&req).await.unwrap();
        assert!(series.is_empty());
        assert_eq!(series.ticker, "NOPE");
    }

    #[tokio::test]
    async fn test_csv_source_bad_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("BAD.csv"), "Date,Open,High,Low,Close\n2023-01-03,x,1,1,1\n").unwrap();
        let source = CsvDirectorySource::new(dir.path());
        let req = PriceRequest::new("BAD", d(2023, 1, 1), d(2023, 2, 1)).unwrap();
        let err = source.fetch(&req).await.unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
    }

    #[tokio::test]
    async fn test_cached_source_fetches_once() {
        let inner = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let cache = Arc::new(RwLock::new(PriceCache::new(Duration::from_secs(60))));
        let source = CachedPriceSource::new(inner.clone(), cache.clone());

        let req = PriceRequest::new("AAPL", d(2023, 1, 1), d(2023, 2, 1)).unwrap();
        source.fetch(&req).await.unwrap();
        source.fetch(&req).await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);

        let other = PriceRequest::new("AAPL", d(2023, 1, 1), d(2023, 3, 1)).unwrap();
        source.fetch(&other).await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_cached_source_refetches_after_expiry() {
        let inner = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let cache = Arc::new(RwLock::new(PriceCache::new(Duration::ZERO)));
        let source = CachedPriceSource::new(inner.clone(), cache);

        let req = PriceRequest::new("AAPL", d(2023, 1, 1), d(2023, 2, 1)).unwrap();
        source.fetch(&req).await.unwrap();
        source.fetch(&req).await.unwrap();
        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cached_source_purges_stale_keys_on_insert() {
        let inner = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let cache = Arc::new(RwLock::new(PriceCache::new(Duration::ZERO)));
        let source = CachedPriceSource::new(inner, cache.clone());

        // Neither key is asked for again, so only the insert-time purge can drop them.
        for ticker in ["AAPL", "TSLA", "MSFT"] {
            let req = PriceRequest::new(ticker, d(2023, 1, 1), d(2023, 2, 1)).unwrap();
            source.fetch(&req).await.unwrap();
        }
        assert_eq!(cache.read().await.len(), 1);
    }
}
