// Formatting helpers shared by the engine logs and the dashboard output.
use chrono::NaiveDate;

use crate::models::{Direction, Insight, NoDataReason};

pub const NOT_ENOUGH_DATA: &str = "Not enough data to generate insights.";

/// `$1234.50` style amount, two decimals.
pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

/// Two-decimal percentage, sign preserved: `-3.10%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Natural-language summary for a date range.
pub fn insight_sentence(insight: &Insight, range_start: NaiveDate, range_end: NaiveDate) -> String {
    let summary = match insight {
        Insight::Summary(s) => s,
        Insight::NoData(NoDataReason::InsufficientHistory) => return NOT_ENOUGH_DATA.to_string(),
        Insight::NoData(NoDataReason::ZeroStartPrice) => {
            return "Starting price is zero; percent change is undefined.".to_string()
        }
    };

    let movement = match summary.direction {
        Direction::Up => format!("increased by {}", format_percent(summary.percent_change.abs())),
        Direction::Down => format!("decreased by {}", format_percent(summary.percent_change.abs())),
        Direction::Flat => "remained flat".to_string(),
    };

    format!(
        "Between {} and {}, the stock {}. Average closing price: {}.",
        format_date(range_start),
        format_date(range_end),
        movement,
        format_money(summary.average_close)
    )
}
