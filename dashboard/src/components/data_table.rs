// Recent bars table, shown in beginner mode.
use shared::models::PriceSeries;
use shared::utils::format_date;

use super::heading;

pub fn recent_data_table(series: &PriceSeries, rows: usize) -> String {
    let mut out = heading("Recent Data");
    out.push_str(&format!(
        "{:<10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>14}\n",
        "Date", "Open", "High", "Low", "Close", "Volume"
    ));
    for bar in series.tail(rows) {
        out.push_str(&format!(
            "{:<10}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}  {:>14.0}\n",
            format_date(bar.date),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume
        ));
    }
    out
}
