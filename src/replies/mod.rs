mod food;
mod history;
mod non_food;
pub mod texts;

pub use food::format_food_reply;
pub use history::{format_history_reply, HISTORY_LIMIT};
pub use non_food::format_non_food_reply;

use crate::analysis::NOT_AVAILABLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Kilocalories,
    Grams,
    Milligrams,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kilocalories => "kcal",
            Unit::Grams => "g",
            Unit::Milligrams => "mg",
        }
    }
}

/// `"{value} {unit}"` with one decimal place, dropped when it rounds to `.0`.
pub fn format_amount(value: Option<f64>, unit: Unit) -> String {
    let value = match value {
        Some(v) => {
            let s = format!("{v:.1}");
            s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
        }
        None => NOT_AVAILABLE.to_string(),
    };
    format!("{value} {}", unit.symbol())
}
