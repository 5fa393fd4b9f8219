// Price data: CSV input/output, sources and the request cache.
pub mod cache;
pub mod csv_export;
pub mod csv_parser;
pub mod market_data;
pub mod source;

pub use cache::{CacheKey, PriceCache};
pub use market_data::MarketDataStore;
pub use source::{CachedPriceSource, CsvDirectorySource, PriceRequest, PriceSource};
