//! Time-bounded cache of fetched price series.
//!
//! Entries are keyed by the full request (`ticker`, `start`, `end`) and expire
//! after a fixed time-to-live. The cache is owned by whoever builds the data
//! source stack and is shared as `Arc<tokio::sync::RwLock<PriceCache>>`.

use chrono::NaiveDate;
use shared::models::PriceSeries;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::source::PriceRequest;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<&PriceRequest> for CacheKey {
    fn from(req: &PriceRequest) -> Self {
        CacheKey {
            ticker: req.ticker.clone(),
            start: req.start,
            end: req.end,
        }
    }
}

struct CachedEntry {
    series: PriceSeries,
    stored_at: Instant,
}

pub struct PriceCache {
    ttl: Duration,
    entries: HashMap<CacheKey, CachedEntry>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        PriceCache {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a copy of the cached series if it is still fresh; an expired entry is dropped.
    pub fn get(&mut self, key: &CacheKey) -> Option<PriceSeries> {
        match self.entries.get(key) {
            Some(entry) if self.is_fresh(entry) => Some(entry.series.clone()),
            Some(_) => {
                tracing::debug!(ticker = %key.ticker, start = %key.start, end = %key.end, "Evicting expired cache entry");
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, key: CacheKey, series: PriceSeries) {
        self.entries.insert(
            key,
            CachedEntry {
                series,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&mut self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes expired entries and returns how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CachedEntry) -> bool {
        entry.stored_at.elapsed() < self.ttl
    }
}
