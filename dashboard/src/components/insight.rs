// Natural-language insight for one ticker.
use chrono::NaiveDate;
use shared::models::Insight;
use shared::utils::insight_sentence;

use super::heading;

pub fn insight_block(insight: &Insight, range_start: NaiveDate, range_end: NaiveDate) -> String {
    let mut out = heading("Insight");
    out.push_str(&insight_sentence(insight, range_start, range_end));
    out.push('\n');
    out
}
