use super::token::{PendingMealToken, TokenKeys};
use crate::error::AppError;

/// Platform limit on postback data length.
pub const MAX_POSTBACK_DATA_LEN: usize = 300;

const CONFIRM_EAT_PREFIX: &str = "action=eat&token=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostbackAction {
    ConfirmEat(String),
    Decline,
}

impl PostbackAction {
    /// Signs `meal` into an eat action whose data fits the postback limit.
    pub fn confirm_eat(keys: &TokenKeys, meal: &PendingMealToken) -> Result<Self, AppError> {
        let token = keys.sign_within(meal, MAX_POSTBACK_DATA_LEN - CONFIRM_EAT_PREFIX.len())?;
        Ok(PostbackAction::ConfirmEat(token))
    }

    pub fn to_data(&self) -> String {
        match self {
            PostbackAction::ConfirmEat(token) => format!("{CONFIRM_EAT_PREFIX}{token}"),
            PostbackAction::Decline => "action=decline".to_string(),
        }
    }

    pub fn parse(data: &str) -> Result<Self, AppError> {
        let mut action = None;
        let mut token = None;
        for pair in data.split('&') {
            match pair.split_once('=') {
                Some(("action", v)) => action = Some(v),
                Some(("token", v)) => token = Some(v),
                _ => {}
            }
        }
        match (action, token) {
            (Some("eat"), Some(t)) if !t.is_empty() => Ok(PostbackAction::ConfirmEat(t.to_string())),
            (Some("decline"), _) => Ok(PostbackAction::Decline),
            _ => Err(AppError::InvalidToken),
        }
    }
}
