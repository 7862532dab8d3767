use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{analysis::FoodInfo, error::AppError, meals::NewMealRecord, state::AppState};

/// Nutrition summary carried through the "eat" button instead of a session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingMealToken {
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(rename = "c", default, skip_serializing_if = "Option::is_none")]
    pub carbohydrate: Option<f64>,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(rename = "k", default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

impl From<&FoodInfo> for PendingMealToken {
    fn from(food: &FoodInfo) -> Self {
        Self {
            name: food.name.clone(),
            protein: food.protein,
            carbohydrate: food.carbohydrate,
            fat: food.fat,
            sodium: food.sodium,
            calories: food.calories,
        }
    }
}

/// A verified eat token. `jti` identifies the button press, so a replay saves nothing new.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedMeal {
    pub jti: String,
    pub meal: PendingMealToken,
}

impl VerifiedMeal {
    pub fn into_record(self, user_id: &str) -> NewMealRecord {
        let meal = self.meal;
        NewMealRecord {
            user_id: user_id.to_string(),
            food_name: meal.name,
            protein: meal.protein,
            carbohydrate: meal.carbohydrate,
            fat: meal.fat,
            sodium: meal.sodium,
            calories: meal.calories,
            materials: None,
            details: None,
            token_id: Some(self.jti),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    exp: usize,
    jti: String,
    meal: PendingMealToken,
}

#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDuration,
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        TokenKeys::new(
            &state.config.line.channel_secret,
            state.config.pending_token_ttl_minutes,
        )
    }
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: TimeDuration::minutes(ttl_minutes),
        }
    }

    pub fn sign(&self, meal: &PendingMealToken) -> Result<String, AppError> {
        let exp = OffsetDateTime::now_utc() + self.ttl;
        let claims = Claims {
            exp: exp.unix_timestamp().max(0) as usize,
            jti: format!("{:032x}", rand::random::<u128>()),
            meal: meal.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(e.into()))?;
        Ok(token)
    }

    /// Signs, shortening the food name until the token is at most `max_len` bytes.
    pub fn sign_within(&self, meal: &PendingMealToken, max_len: usize) -> Result<String, AppError> {
        let mut meal = meal.clone();
        loop {
            let token = self.sign(&meal)?;
            if token.len() <= max_len {
                return Ok(token);
            }
            if meal.name.pop().is_none() {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "pending meal token cannot fit in {max_len} bytes"
                )));
            }
            debug!(len = token.len(), max_len, "token too long; shortening name");
        }
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedMeal, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => {
                    warn!(error = %e, "rejected pending meal token");
                    AppError::InvalidToken
                }
            }
        })?;
        debug!(jti = %data.claims.jti, "pending meal token verified");
        Ok(VerifiedMeal { jti: data.claims.jti, meal: data.claims.meal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(name: &str) -> PendingMealToken {
        PendingMealToken {
            name: name.into(),
            protein: Some(18.0),
            carbohydrate: Some(70.5),
            fat: Some(20.0),
            sodium: None,
            calories: Some(550.0),
        }
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let keys = TokenKeys::new("dev-secret", 60);
        let original = meal("ผัดไทย (Pad Thai)");
        let token = keys.sign(&original).expect("sign");
        assert_eq!(keys.verify(&token).expect("verify").meal, original);
    }

    #[test]
    fn from_food_info_keeps_nutrition() {
        let food = FoodInfo {
            name: "Som Tam".into(),
            protein: Some(3.0),
            carbohydrate: None,
            fat: Some(1.5),
            sodium: Some(900.0),
            calories: Some(120.0),
            materials: "papaya".into(),
            details: "spicy".into(),
        };
        let verified = VerifiedMeal { jti: "abc".into(), meal: PendingMealToken::from(&food) };
        let record = verified.into_record("U1");
        assert_eq!(record.food_name, "Som Tam");
        assert_eq!(record.sodium, Some(900.0));
        assert_eq!(record.carbohydrate, None);
        assert_eq!(record.user_id, "U1");
        assert_eq!(record.materials, None);
        assert_eq!(record.token_id.as_deref(), Some("abc"));
    }

    #[test]
    fn rejects_other_secret() {
        let token = TokenKeys::new("a", 60).sign(&meal("x")).unwrap();
        let err = TokenKeys::new("b", 60).verify(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn rejects_tampered_payload() {
        let keys = TokenKeys::new("dev-secret", 60);
        let token = keys.sign(&meal("x")).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1].insert(3, 'A');
        let err = keys.verify(&parts.join(".")).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
        assert!(matches!(keys.verify("garbage").unwrap_err(), AppError::InvalidToken));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let keys = TokenKeys::new("dev-secret", -10);
        let token = keys.sign(&meal("x")).unwrap();
        assert!(matches!(keys.verify(&token).unwrap_err(), AppError::TokenExpired));
    }

    #[test]
    fn each_token_gets_a_fresh_nonce() {
        let keys = TokenKeys::new("dev-secret", 60);
        let m = meal("x");
        let a = keys.verify(&keys.sign(&m).unwrap()).unwrap();
        let b = keys.verify(&keys.sign(&m).unwrap()).unwrap();
        assert_eq!(a.jti.len(), 32);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn sign_within_shortens_long_names_only() {
        let keys = TokenKeys::new("dev-secret", 60);
        let long = meal(&"ข้าวมันไก่".repeat(20));
        let token = keys.sign_within(&long, 260).unwrap();
        assert!(token.len() <= 260);
        let decoded = keys.verify(&token).unwrap().meal;
        assert!(long.name.starts_with(&decoded.name));
        assert!(decoded.name.len() < long.name.len());
        assert_eq!(decoded.calories, long.calories);

        let short = meal("Pad Thai");
        let decoded = keys.verify(&keys.sign_within(&short, 260).unwrap()).unwrap().meal;
        assert_eq!(decoded, short);
    }
}
