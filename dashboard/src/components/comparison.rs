// Multi-ticker comparison table.
use engine::services::ComparisonRow;
use shared::utils::{format_money, format_percent};

use super::heading;

pub fn comparison_table(rows: &[ComparisonRow]) -> String {
    let mut out = heading("Compare Selected Stocks");
    if rows.is_empty() {
        out.push_str("No tickers with enough data to compare.\n");
        return out;
    }
    out.push_str(&format!("{:<8}  {:>12}  {:>12}  {:>9}\n", "Ticker", "Start", "End", "Change"));
    for row in rows {
        out.push_str(&format!(
            "{:<8}  {:>12}  {:>12}  {:>9}\n",
            row.ticker,
            format_money(row.start_close),
            format_money(row.end_close),
            format_percent(row.percent_change)
        ));
    }
    out
}
