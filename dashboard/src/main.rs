// Stock dashboard entry point
use clap::Parser;
use engine::data::{CachedPriceSource, CsvDirectorySource, PriceCache};
use engine::services::DashboardService;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod components;
mod config;
mod state;

use cli::Cli;
use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the report on stdout can be piped.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let app_config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_default()?,
    };
    tracing::info!("Loaded configuration version {}.", app_config.version);

    let today = chrono::Local::now().date_naive();
    let state = AppState::resolve(&app_config, &cli, today)?;

    let cache = Arc::new(RwLock::new(PriceCache::new(state.engine.cache_ttl())));
    let source = CachedPriceSource::new(CsvDirectorySource::new(&state.engine.data_dir), cache);
    tracing::info!(data_dir = %state.engine.data_dir.display(), "Reading prices from CSV directory");
    let service = DashboardService::new(source, state.engine.clone())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app::run(&state, &service, &mut out).await
}
