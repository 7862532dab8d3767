use serde_json::{json, Value};
use time::{format_description::FormatItem, macros::format_description, UtcOffset};

use super::{format_amount, texts, Unit};
use crate::{line::Message, meals::MealRecord};

pub const HISTORY_LIMIT: usize = 5;

const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");

/// One card per record, newest first, at most five. Empty history is a plain text reply.
pub fn format_history_reply(records: &[MealRecord], offset: UtcOffset) -> Message {
    if records.is_empty() {
        return Message::text(texts::NO_HISTORY);
    }
    let mut newest_first: Vec<&MealRecord> = records.iter().collect();
    newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let bubbles: Vec<Value> = newest_first
        .into_iter()
        .take(HISTORY_LIMIT)
        .map(|r| history_bubble(r, offset))
        .collect();

    Message::flex(texts::HISTORY_ALT, json!({ "type": "carousel", "contents": bubbles }))
}

fn history_bubble(record: &MealRecord, offset: UtcOffset) -> Value {
    let when = record
        .created_at
        .to_offset(offset)
        .format(DATE_FORMAT)
        .unwrap_or_else(|_| "-".to_string());
    json!({
        "type": "bubble",
        "size": "kilo",
        "body": {
            "type": "box",
            "layout": "vertical",
            "spacing": "sm",
            "contents": [
                { "type": "text", "text": format!("🍽️ {}", record.food_name), "weight": "bold", "wrap": true },
                { "type": "text", "text": format!("🕒 {when}"), "size": "sm", "color": "#555555" },
                { "type": "text", "text": format!("🔥 {}", format_amount(record.calories, Unit::Kilocalories)), "size": "sm" },
                { "type": "text", "text": format!("📍 {}", location_label(record)), "size": "sm", "color": "#555555", "wrap": true }
            ]
        }
    })
}

pub fn location_label(record: &MealRecord) -> String {
    if let Some(name) = record.location_name.as_deref().filter(|n| !n.trim().is_empty()) {
        return name.to_string();
    }
    match (record.latitude, record.longitude) {
        (Some(lat), Some(lon)) => format!("{lat:.4}, {lon:.4}"),
        _ => texts::NO_LOCATION.to_string(),
    }
}
