use axum::extract::FromRef;
use time::UtcOffset;
use tracing::{debug, error, info, instrument, warn};

use super::{
    command::Command,
    postback::PostbackAction,
    token::{PendingMealToken, TokenKeys},
};
use crate::{
    analysis::{interpret, ClassificationResult, FoodInfo},
    classifier,
    error::AppError,
    line::{
        dto::{Event, EventMessage},
        Action, Message,
    },
    meals::Location,
    replies::{self, texts, Unit, HISTORY_LIMIT},
    state::AppState,
};

/// What the user sent, reduced to the shapes that drive the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Image { message_id: String },
    Text(String),
    Location(Location),
    Postback(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub user_id: String,
    pub reply_token: String,
    pub inbound: Inbound,
}

impl Turn {
    /// `None` for events the bot ignores: stickers, follows, group events without a user,
    /// and standby-mode events that carry no reply token.
    pub fn from_event(event: Event) -> Option<Self> {
        let (reply_token, source, inbound) = match event {
            Event::Message { reply_token, source, message } => {
                let inbound = match message {
                    EventMessage::Text { text } => Inbound::Text(text),
                    EventMessage::Image { id } => Inbound::Image { message_id: id },
                    EventMessage::Location { title, address, latitude, longitude } => {
                        Inbound::Location(Location {
                            latitude,
                            longitude,
                            name: title.or(address).filter(|n| !n.trim().is_empty()),
                        })
                    }
                    EventMessage::Unsupported => return None,
                };
                (reply_token, source, inbound)
            }
            Event::Postback { reply_token, source, postback } => {
                (reply_token, source, Inbound::Postback(postback.data))
            }
            Event::Unsupported => return None,
        };
        Some(Turn { user_id: source.user_id?, reply_token: reply_token?, inbound })
    }
}

/// Messages produced by one turn: replied with the reply token, then pushed.
#[derive(Debug, Default, PartialEq)]
struct Outcome {
    reply: Vec<Message>,
    push: Vec<Message>,
}

impl Outcome {
    fn reply(message: Message) -> Self {
        Self { reply: vec![message], push: Vec::new() }
    }
}

pub async fn handle_event(state: &AppState, event: Event) {
    match Turn::from_event(event) {
        Some(turn) => handle_turn(state, turn).await,
        None => debug!("ignoring unsupported event"),
    }
}

/// Runs one turn. Failures become an apology reply; nothing propagates.
#[instrument(skip(state, turn), fields(user_id = %turn.user_id))]
pub async fn handle_turn(state: &AppState, turn: Turn) {
    let outcome = match dispatch(state, &turn).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "turn failed");
            Outcome::reply(Message::text(apology_for(&e)))
        }
    };

    if !outcome.reply.is_empty() {
        if let Err(e) = state.messaging.reply(&turn.reply_token, outcome.reply).await {
            error!(error = %e, "reply failed");
        }
    }
    if !outcome.push.is_empty() {
        if let Err(e) = state.messaging.push(&turn.user_id, outcome.push).await {
            warn!(error = %e, "push failed");
        }
    }
}

pub fn apology_for(err: &AppError) -> &'static str {
    match err {
        AppError::Upstream { .. } | AppError::Transport(_) => texts::ANALYSIS_FAILED,
        AppError::Storage(_) => texts::SAVE_FAILED,
        AppError::TokenExpired => texts::ACTION_EXPIRED,
        _ => texts::GENERIC_FAILURE,
    }
}

async fn dispatch(state: &AppState, turn: &Turn) -> Result<Outcome, AppError> {
    match &turn.inbound {
        Inbound::Image { message_id } => on_image(state, message_id).await,
        Inbound::Text(text) => on_text(state, &turn.user_id, text).await,
        Inbound::Postback(data) => on_postback(state, &turn.user_id, data).await,
        Inbound::Location(location) => on_location(state, &turn.user_id, location).await,
    }
}

async fn on_image(state: &AppState, message_id: &str) -> Result<Outcome, AppError> {
    let image = state.messaging.get_content(message_id).await?;
    let raw = classifier::classify(state.completion.as_ref(), image).await?;
    let message = match interpret(&raw) {
        ClassificationResult::Food(food) => {
            info!(food = %food.name, "food recognised");
            food_card(state, &food)?
        }
        ClassificationResult::NonFood(info) => {
            info!(category = info.category.as_str(), "non-food image");
            replies::format_non_food_reply(&info)
        }
    };
    Ok(Outcome::reply(message))
}

async fn on_text(state: &AppState, user_id: &str, text: &str) -> Result<Outcome, AppError> {
    let message = match Command::parse(text) {
        Command::SaveMeal => Message::text_with_actions(
            texts::SAVE_MEAL_PROMPT,
            vec![
                Action::Camera { label: texts::TAKE_PHOTO_LABEL.to_string() },
                Action::CameraRoll { label: texts::PICK_PHOTO_LABEL.to_string() },
            ],
        ),
        Command::History => {
            let records = state.meals.list_recent(user_id, HISTORY_LIMIT as i64).await?;
            replies::format_history_reply(&records, display_offset(state))
        }
        Command::Help => Message::text(texts::HELP),
        Command::Advice(question) => {
            Message::text(classifier::advise(state.completion.as_ref(), &question).await?)
        }
    };
    Ok(Outcome::reply(message))
}

async fn on_postback(state: &AppState, user_id: &str, data: &str) -> Result<Outcome, AppError> {
    match PostbackAction::parse(data)? {
        PostbackAction::ConfirmEat(token) => {
            let verified = TokenKeys::from_ref(state).verify(&token)?;
            let calories = replies::format_amount(verified.meal.calories, Unit::Kilocalories);
            let name = verified.meal.name.clone();
            let Some(id) = state.meals.insert(verified.into_record(user_id)).await? else {
                info!(food = %name, "eat button replayed; already recorded");
                return Ok(Outcome::reply(Message::text(texts::meal_already_saved(&name))));
            };
            info!(%id, food = %name, "meal recorded");
            Ok(Outcome {
                reply: vec![Message::text(texts::meal_saved(&name, &calories))],
                push: vec![Message::text_with_actions(
                    texts::LOCATION_PROMPT,
                    vec![Action::Location { label: texts::SHARE_LOCATION_LABEL.to_string() }],
                )],
            })
        }
        PostbackAction::Decline => Ok(Outcome::reply(Message::text(texts::DECLINED))),
    }
}

async fn on_location(
    state: &AppState,
    user_id: &str,
    location: &Location,
) -> Result<Outcome, AppError> {
    let message = match state.meals.update_location(user_id, location).await? {
        Some(id) => {
            info!(%id, "location attached");
            let place = location
                .name
                .clone()
                .unwrap_or_else(|| format!("{:.4}, {:.4}", location.latitude, location.longitude));
            Message::text(texts::location_saved(&place))
        }
        None => Message::text(texts::NO_MEAL_FOR_LOCATION),
    };
    Ok(Outcome::reply(message))
}

/// Food card with a signed eat button.
pub fn food_card(state: &AppState, food: &FoodInfo) -> Result<Message, AppError> {
    let keys = TokenKeys::from_ref(state);
    let confirm = PostbackAction::confirm_eat(&keys, &PendingMealToken::from(food))?;
    Ok(replies::format_food_reply(
        food,
        &confirm.to_data(),
        &PostbackAction::Decline.to_data(),
    ))
}

fn display_offset(state: &AppState) -> UtcOffset {
    UtcOffset::from_hms(state.config.display_utc_offset_hours, 0, 0).unwrap_or(UtcOffset::UTC)
}
