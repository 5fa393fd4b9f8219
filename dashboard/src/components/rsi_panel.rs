// Latest RSI and SMA readings for one ticker.
use engine::config::EngineSettings;
use engine::services::ReadyReport;
use shared::utils::{format_date, format_money};

use super::heading;

pub fn indicator_panel(report: &ReadyReport, settings: &EngineSettings) -> String {
    let mut out = heading("Indicators");

    match &report.rsi_reading {
        Some(reading) => out.push_str(&format!(
            "{} on {}: {:.2} ({}; overbought >= {:.0}, oversold <= {:.0})\n",
            report.rsi.name,
            format_date(reading.date),
            reading.value,
            reading.zone.label(),
            settings.overbought,
            settings.oversold
        )),
        None if report.series.len() <= settings.rsi_window => out.push_str(&format!(
            "{}: not enough history ({} bars, needs {})\n",
            report.rsi.name,
            report.series.len(),
            settings.rsi_window + 1
        )),
        None => out.push_str(&format!("{}: undefined (no price movement in window)\n", report.rsi.name)),
    }

    match report.sma.latest() {
        Some((date, value)) => out.push_str(&format!(
            "{} on {}: {}\n",
            report.sma.name,
            format_date(date),
            format_money(value)
        )),
        None => out.push_str(&format!("{}: not enough history\n", report.sma.name)),
    }
    out
}
