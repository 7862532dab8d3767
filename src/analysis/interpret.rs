use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

use super::types::{Category, ClassificationResult, FoodInfo, NonFoodInfo, RawClassification};

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_FOOD_NAME: &str = "อาหารไม่ทราบชื่อ (Unknown dish)";
pub const UNKNOWN_SUBCATEGORY: &str = "unknown";
// Upper bounds on classifier-supplied text, in chars.
const MAX_NAME_CHARS: usize = 100;
const MAX_SUBCATEGORY_CHARS: usize = 60;
const MAX_EMOJI_CHARS: usize = 8;
const MAX_BODY_CHARS: usize = 1000;

pub const FALLBACK_MESSAGE: &str = "ขออภัยค่ะ ไม่สามารถระบุได้ว่าภาพนี้คืออะไร ลองส่งรูปอาหารที่ชัดขึ้นอีกครั้งนะคะ\nSorry, I couldn't recognise this image. Please try a clearer photo of your meal.";

impl RawClassification {
    /// What the classifier yields when the model answered without usable JSON.
    pub fn fallback() -> Self {
        RawClassification(json!({
            "is_food": false,
            "category": Category::Other.as_str(),
            "subcategory": UNKNOWN_SUBCATEGORY,
            "message": FALLBACK_MESSAGE,
        }))
    }
}

/// Never fails: every field has a safe default so the reply can always render.
pub fn interpret(raw: &RawClassification) -> ClassificationResult {
    let v = &raw.0;
    if !v.is_object() {
        return interpret(&RawClassification::fallback());
    }
    if truthy(v.get("is_food")) {
        ClassificationResult::Food(FoodInfo {
            name: text(v.get("name"))
                .map(|s| clamp(s, MAX_NAME_CHARS))
                .unwrap_or_else(|| UNKNOWN_FOOD_NAME.to_string()),
            protein: number(v.get("protein")),
            carbohydrate: number(v.get("carbohydrate").or_else(|| v.get("carbs"))),
            fat: number(v.get("fat")),
            sodium: number(v.get("sodium")),
            calories: number(v.get("calories")),
            materials: text(v.get("materials"))
                .map(|s| clamp(s, MAX_BODY_CHARS))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            details: text(v.get("details"))
                .map(|s| clamp(s, MAX_BODY_CHARS))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
    } else {
        let category = v
            .get("category")
            .and_then(Value::as_str)
            .map(Category::parse)
            .unwrap_or(Category::Other);
        ClassificationResult::NonFood(NonFoodInfo {
            category,
            subcategory: text(v.get("subcategory"))
                .map(|s| clamp(s, MAX_SUBCATEGORY_CHARS))
                .unwrap_or_else(|| UNKNOWN_SUBCATEGORY.to_string()),
            message: text(v.get("message"))
                .map(|s| clamp(s, MAX_BODY_CHARS))
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            emoji: text(v.get("emoji"))
                .map(|s| clamp(s, MAX_EMOJI_CHARS))
                .unwrap_or_else(|| category.default_emoji().to_string()),
        })
    }
}

fn truthy(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// Accepts strings, or arrays of strings joined with ", ". Blank counts as missing.
fn text(v: Option<&Value>) -> Option<String> {
    let s = match v? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|i| match i {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

/// Cuts `s` to at most `max` chars, marking the cut with an ellipsis.
fn clamp(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        return s;
    }
    let mut cut: String = s.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Numbers, or strings like "550 kcal" / "1,200". Negative or non-finite is missing.
fn number(v: Option<&Value>) -> Option<f64> {
    lazy_static! {
        static ref NUMBER_RE: Regex = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();
    }
    let n = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let cleaned = s.replace(',', "");
            NUMBER_RE.find(&cleaned)?.as_str().parse::<f64>().ok()?
        }
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}
