// Text components for the dashboard report. Each returns the block as a String.
pub mod comparison;
pub mod data_table;
pub mod glossary;
pub mod insight;
pub mod rsi_panel;

pub use comparison::comparison_table;
pub use data_table::recent_data_table;
pub use glossary::glossary;
pub use insight::insight_block;
pub use rsi_panel::indicator_panel;

/// Title line with a dashed underline of the same width.
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "-".repeat(title.chars().count()))
}
