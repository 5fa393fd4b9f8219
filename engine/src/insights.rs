// Range insight: percent change and average close over a price series.
use shared::models::{Direction, Insight, InsightSummary, NoDataReason, PriceSeries};

/// Summarizes `series`, which the caller has already restricted to the range of interest.
///
/// Never fails: fewer than two bars, or a zero starting close, come back as
/// [`Insight::NoData`] for the caller to render as a message.
pub fn summarize(series: &PriceSeries) -> Insight {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= 2 => (first, last),
        _ => return Insight::NoData(NoDataReason::InsufficientHistory),
    };

    let start_close = first.close;
    let end_close = last.close;
    if start_close == 0.0 {
        tracing::warn!(ticker = %series.ticker, date = %first.date, "Starting close is zero; skipping percent change");
        return Insight::NoData(NoDataReason::ZeroStartPrice);
    }

    let percent_change = (end_close - start_close) / start_close * 100.0;
    let direction = if percent_change > 0.0 {
        Direction::Up
    } else if percent_change < 0.0 {
        Direction::Down
    } else {
        Direction::Flat
    };
    let average_close = series.bars().iter().map(|b| b.close).sum::<f64>() / series.len() as f64;

    Insight::Summary(InsightSummary {
        direction,
        percent_change,
        average_close,
        start_close,
        end_close,
    })
}
