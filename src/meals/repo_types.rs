use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: String,
    pub food_name: String,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
    pub sodium: Option<f64>,
    pub calories: Option<f64>,
    pub materials: Option<String>,
    pub details: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Insert payload; `id` and `created_at` are assigned by the store.
/// `token_id` is the eat button's nonce; a second insert with the same one is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMealRecord {
    pub user_id: String,
    pub food_name: String,
    pub protein: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub fat: Option<f64>,
    pub sodium: Option<f64>,
    pub calories: Option<f64>,
    pub materials: Option<String>,
    pub details: Option<String>,
    pub token_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, alias = "location_name")]
    pub name: Option<String>,
}
