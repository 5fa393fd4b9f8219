// Side-by-side view of several tickers over the same range.
use super::{ComparisonRow, TickerOutcome};

/// One row per ticker that produced a summary, in request order.
/// Tickers without data, without enough history, or that failed are left out.
pub fn compare(outcomes: &[TickerOutcome]) -> Vec<ComparisonRow> {
    outcomes
        .iter()
        .filter_map(|outcome| outcome.ready())
        .filter_map(|report| {
            let summary = report.insight.summary()?;
            Some(ComparisonRow {
                ticker: report.series.ticker.clone(),
                start_close: summary.start_close,
                end_close: summary.end_close,
                percent_change: summary.percent_change,
                direction: summary.direction,
            })
        })
        .collect()
}
