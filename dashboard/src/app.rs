// Renders one dashboard session: a section per ticker, then the comparison.
use engine::data::csv_export::export_series;
use engine::data::PriceSource;
use engine::services::{DashboardService, ReadyReport, TickerOutcome, TickerReport};
use std::io::Write;

use crate::components::{comparison_table, glossary, indicator_panel, insight_block, recent_data_table};
use crate::state::AppState;

pub async fn run<S: PriceSource, W: Write>(
    state: &AppState,
    service: &DashboardService<S>,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "Stock Market Dashboard")?;
    writeln!(out, "======================")?;
    writeln!(out)?;

    if state.show_glossary {
        writeln!(out, "{}", glossary())?;
    }

    let requests = state.requests()?;
    tracing::info!(tickers = ?state.tickers, start = %state.start_date, end = %state.end_date, "Building dashboard");
    let outcomes = service.build_reports(&requests).await;

    for outcome in &outcomes {
        writeln!(out, "## {}", outcome.ticker())?;
        writeln!(out)?;
        match outcome {
            TickerOutcome::Report(TickerReport::Ready(report)) => {
                render_ready(state, service, report, out)?;
            }
            TickerOutcome::Report(TickerReport::NoData { ticker }) => {
                writeln!(out, "No data for {}. Try a different ticker.", ticker)?;
                writeln!(out)?;
            }
            TickerOutcome::Failed { ticker, error } => {
                writeln!(out, "Could not load {}: {}", ticker, error)?;
                writeln!(out)?;
            }
        }
    }

    if state.tickers.len() > 1 {
        let rows = service.comparison(&outcomes);
        writeln!(out, "{}", comparison_table(&rows))?;
    }
    out.flush()?;
    Ok(())
}

fn render_ready<S: PriceSource, W: Write>(
    state: &AppState,
    service: &DashboardService<S>,
    report: &ReadyReport,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "{}", insight_block(&report.insight, state.start_date, state.end_date))?;

    if state.beginner_mode {
        writeln!(out, "{}", recent_data_table(&report.series, state.recent_rows))?;
    }

    writeln!(out, "{}", indicator_panel(report, service.settings()))?;

    if let Some(dir) = &state.export_dir {
        match export_series(dir, &report.series, Some(&report.rsi)) {
            Ok(path) => writeln!(out, "Saved {} data to {}", report.series.ticker, path.display())?,
            Err(e) => {
                tracing::error!(ticker = %report.series.ticker, error_detail = ?e, "CSV export failed");
                writeln!(out, "Could not export {}: {}", report.series.ticker, e)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
