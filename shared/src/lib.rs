// Domain models and formatting helpers shared by the engine and the dashboard.
pub mod models;
pub mod utils;
