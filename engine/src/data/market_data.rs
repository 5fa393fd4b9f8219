// In-memory price store, usable as a PriceSource for demos and tests.
use async_trait::async_trait;
use shared::models::{PriceBar, PriceSeries};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::source::{PriceRequest, PriceSource};
use crate::error::Result;

pub struct MarketDataStore {
    // Bars per upper-cased ticker, kept sorted and unique by date.
    data: RwLock<HashMap<String, Vec<PriceBar>>>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        MarketDataStore {
            data: RwLock::new(HashMap::new()),
        }
    }

    pub async fn add_bars(&self, ticker: &str, new_bars: Vec<PriceBar>) {
        let mut data = self.data.write().await;
        let bars = data.entry(ticker.trim().to_uppercase()).or_default();

        // Newer bars replace older ones for the same date.
        let mut merged = new_bars;
        merged.extend(bars.drain(..));
        let series = PriceSeries::new(ticker, merged);
        bars.extend(series.bars().iter().cloned());
    }
}

impl Default for MarketDataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for MarketDataStore {
    async fn fetch(&self, request: &PriceRequest) -> Result<PriceSeries> {
        let data = self.data.read().await;
        let bars = data
            .get(&request.ticker)
            .map(|bars| bars.iter().filter(|b| request.contains(b.date)).cloned().collect())
            .unwrap_or_default();
        Ok(PriceSeries::new(&request.ticker, bars))
    }
}
