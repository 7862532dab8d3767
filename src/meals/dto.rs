use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::analysis::{FoodInfo, NOT_AVAILABLE};

/// Debug push of a food card. Works for both form and JSON bodies.
#[derive(Debug, Deserialize)]
pub struct FoodReplyRequest {
    pub user_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbohydrate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sodium: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: Option<f64>,
    #[serde(default)]
    pub materials: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl From<FoodReplyRequest> for FoodInfo {
    fn from(r: FoodReplyRequest) -> Self {
        let or_na = |s: Option<String>| {
            s.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        FoodInfo {
            name: r.name,
            protein: r.protein,
            carbohydrate: r.carbohydrate,
            fat: r.fat,
            sodium: r.sodium,
            calories: r.calories,
            materials: or_na(r.materials),
            details: or_na(r.details),
        }
    }
}

/// Form fields arrive as strings, JSON as numbers; blank means missing.
fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if !s.trim().is_empty() => {
            Some(s.trim().parse::<f64>().map_err(serde::de::Error::custom)?)
        }
        _ => None,
    })
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 {
    5
}

pub const MAX_LIMIT: i64 = 50;
