// Engine library root: indicators, range insights, price data sources and the
// per-ticker dashboard service.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod insights;
pub mod services;

pub use error::{EngineError, Result};
