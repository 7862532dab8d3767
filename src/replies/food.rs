use serde_json::{json, Value};

use super::{format_amount, texts, Unit};
use crate::{
    analysis::FoodInfo,
    line::{Action, Message},
};

const ACCENT: &str = "#27AE60";

/// Nutrition card for a recognised dish, with eat / skip buttons.
pub fn format_food_reply(food: &FoodInfo, confirm_data: &str, decline_data: &str) -> Message {
    let rows = [
        (texts::CALORIES_LABEL, food.calories, Unit::Kilocalories),
        (texts::PROTEIN_LABEL, food.protein, Unit::Grams),
        (texts::FAT_LABEL, food.fat, Unit::Grams),
        (texts::CARBOHYDRATE_LABEL, food.carbohydrate, Unit::Grams),
        (texts::SODIUM_LABEL, food.sodium, Unit::Milligrams),
    ];

    let mut body: Vec<Value> = vec![json!({
        "type": "text", "text": texts::NUTRITION_TITLE, "weight": "bold", "size": "md"
    })];
    body.extend(
        rows.iter()
            .map(|(label, value, unit)| nutrition_row(label, &format_amount(*value, *unit))),
    );
    body.extend([
        json!({ "type": "separator", "margin": "md" }),
        json!({ "type": "text", "text": texts::INGREDIENTS_TITLE, "weight": "bold", "size": "sm" }),
        json!({ "type": "text", "text": food.materials, "wrap": true, "size": "sm", "color": "#555555" }),
        json!({ "type": "separator", "margin": "md" }),
        json!({ "type": "text", "text": texts::ADVICE_TITLE, "weight": "bold", "size": "sm" }),
        json!({ "type": "text", "text": food.details, "wrap": true, "size": "sm", "color": "#555555" }),
        json!({ "type": "text", "text": texts::DISCLAIMER, "wrap": true, "size": "xxs", "color": "#999999", "margin": "md" }),
    ]);

    let eat = Action::Postback {
        label: texts::CONFIRM_EAT_LABEL.to_string(),
        data: confirm_data.to_string(),
        display_text: texts::CONFIRM_EAT_DISPLAY.to_string(),
    };
    let skip = Action::Postback {
        label: texts::DECLINE_LABEL.to_string(),
        data: decline_data.to_string(),
        display_text: texts::DECLINE_DISPLAY.to_string(),
    };

    let bubble = json!({
        "type": "bubble",
        "header": {
            "type": "box",
            "layout": "vertical",
            "backgroundColor": ACCENT,
            "contents": [{
                "type": "text", "text": format!("🍽️ {}", food.name),
                "weight": "bold", "size": "lg", "color": "#FFFFFF", "wrap": true
            }]
        },
        "body": { "type": "box", "layout": "vertical", "spacing": "sm", "contents": body },
        "footer": {
            "type": "box",
            "layout": "vertical",
            "spacing": "sm",
            "contents": [
                { "type": "button", "style": "primary", "color": ACCENT, "action": eat },
                { "type": "button", "style": "link", "action": skip }
            ]
        }
    });

    Message::flex(format!("{} - {}", food.name, texts::NUTRITION_TITLE), bubble)
}

fn nutrition_row(label: &str, value: &str) -> Value {
    json!({
        "type": "box",
        "layout": "horizontal",
        "contents": [
            { "type": "text", "text": label, "size": "sm", "color": "#555555", "flex": 0 },
            { "type": "text", "text": value, "size": "sm", "align": "end", "color": "#111111" }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{interpret, ClassificationResult, RawClassification};

    fn card_json(food: &FoodInfo) -> Value {
        match format_food_reply(food, "action=eat&token=t", "action=decline") {
            Message::Flex { contents, .. } => contents,
            other => panic!("expected flex, got {other:?}"),
        }
    }

    fn all_texts(v: &Value, out: &mut Vec<String>) {
        match v {
            Value::Object(map) => {
                if let Some(Value::String(t)) = map.get("text") {
                    out.push(t.clone());
                }
                map.values().for_each(|c| all_texts(c, out));
            }
            Value::Array(items) => items.iter().for_each(|c| all_texts(c, out)),
            _ => {}
        }
    }

    fn food_from(v: Value) -> FoodInfo {
        match interpret(&RawClassification(v)) {
            ClassificationResult::Food(f) => f,
            other => panic!("expected food, got {other:?}"),
        }
    }

    #[test]
    fn renders_five_rows_with_fixed_units() {
        let food = food_from(json!({
            "is_food": true, "name": "Pad Thai", "calories": 550, "protein": 18,
            "fat": 20, "carbohydrate": 70.5, "sodium": 1200
        }));
        let mut texts_out = Vec::new();
        all_texts(&card_json(&food), &mut texts_out);
        for expected in ["550 kcal", "18 g", "20 g", "70.5 g", "1200 mg"] {
            assert!(texts_out.iter().any(|t| t == expected), "missing {expected}: {texts_out:?}");
        }
        assert!(texts_out.iter().any(|t| t == "🍽️ Pad Thai"));
    }

    #[test]
    fn missing_fields_still_render_every_row() {
        let food = food_from(json!({ "is_food": true, "name": "Mystery curry" }));
        let mut texts_out = Vec::new();
        all_texts(&card_json(&food), &mut texts_out);
        assert_eq!(texts_out.iter().filter(|t| t.as_str() == "N/A g").count(), 3);
        assert!(texts_out.iter().any(|t| t == "N/A kcal"));
        assert!(texts_out.iter().any(|t| t == "N/A mg"));
        for label in [
            texts::CALORIES_LABEL,
            texts::PROTEIN_LABEL,
            texts::FAT_LABEL,
            texts::CARBOHYDRATE_LABEL,
            texts::SODIUM_LABEL,
        ] {
            assert!(texts_out.iter().any(|t| t == label), "missing row {label}");
        }
    }

    #[test]
    fn buttons_carry_postback_data() {
        let food = food_from(json!({ "is_food": true, "name": "Khao Man Gai" }));
        let v = card_json(&food);
        let buttons = &v["footer"]["contents"];
        assert_eq!(buttons[0]["action"]["type"], "postback");
        assert_eq!(buttons[0]["action"]["data"], "action=eat&token=t");
        assert_eq!(buttons[0]["style"], "primary");
        assert_eq!(buttons[1]["action"]["data"], "action=decline");
    }

    #[test]
    fn huge_dish_name_stays_within_alt_text_limit() {
        let food = food_from(json!({ "is_food": true, "name": "ก".repeat(2000) }));
        let Message::Flex { alt_text, .. } =
            format_food_reply(&food, "action=eat&token=t", "action=decline")
        else {
            panic!("expected flex");
        };
        assert!(alt_text.chars().count() <= crate::line::messages::MAX_ALT_TEXT_CHARS);
        assert!(alt_text.chars().count() < 200);
    }
}
