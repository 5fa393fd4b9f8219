use super::heading;

const ENTRIES: &[(&str, &str)] = &[
    ("SMA", "Average price over N days."),
    ("RSI", "Indicates overbought/oversold stock momentum (0-100)."),
    ("Candlestick", "Price movements per day (open, high, low, close)."),
    ("Close Price", "Final trading price of the day."),
];

pub fn glossary() -> String {
    let mut out = heading("Glossary");
    for (term, meaning) in ENTRIES {
        out.push_str(&format!("{:<12} {}\n", format!("{}:", term), meaning));
    }
    out
}
