// Services that orchestrate data sources and the pure computations.
pub mod dashboard_service;

pub use dashboard_service::{
    ComparisonRow, DashboardService, ReadyReport, RsiReading, TickerOutcome, TickerReport,
};
