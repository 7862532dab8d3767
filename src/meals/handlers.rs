use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{FoodReplyRequest, Pagination, MAX_LIMIT},
    repo_types::{Location, MealRecord},
};
use crate::{analysis::FoodInfo, conversation::food_card, error::AppError, state::AppState};

pub fn debug_routes() -> Router<AppState> {
    Router::new()
        .route("/debug/food-reply", post(push_food_reply_form))
        .route("/debug/food-reply/json", post(push_food_reply_json))
        .route("/debug/users/:user_id/meals", get(list_meals))
        .route("/debug/users/:user_id/meals/:id/location", put(set_location))
}

#[derive(Debug, Serialize)]
pub struct Pushed {
    pub status: &'static str,
    pub user_id: String,
}

#[instrument(skip(state, body), fields(user_id = %body.user_id))]
pub async fn push_food_reply_form(
    State(state): State<AppState>,
    Form(body): Form<FoodReplyRequest>,
) -> Result<(StatusCode, Json<Pushed>), AppError> {
    push_food_reply(&state, body).await
}

#[instrument(skip(state, body), fields(user_id = %body.user_id))]
pub async fn push_food_reply_json(
    State(state): State<AppState>,
    Json(body): Json<FoodReplyRequest>,
) -> Result<(StatusCode, Json<Pushed>), AppError> {
    push_food_reply(&state, body).await
}

async fn push_food_reply(
    state: &AppState,
    body: FoodReplyRequest,
) -> Result<(StatusCode, Json<Pushed>), AppError> {
    if body.user_id.trim().is_empty() {
        return Err(AppError::BadRequest("user_id is required".into()));
    }
    let user_id = body.user_id.clone();
    let food = FoodInfo::from(body);
    let card = food_card(state, &food)?;
    state.messaging.push(&user_id, vec![card]).await?;
    info!(food = %food.name, "debug food card pushed");
    Ok((StatusCode::ACCEPTED, Json(Pushed { status: "sent", user_id })))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<MealRecord>>, AppError> {
    let meals = state.meals.list_recent(&user_id, p.limit.clamp(1, MAX_LIMIT)).await?;
    Ok(Json(meals))
}

#[instrument(skip(state, location))]
pub async fn set_location(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, Uuid)>,
    Json(location): Json<Location>,
) -> Result<StatusCode, AppError> {
    if state.meals.update_location_for(&user_id, id, &location).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
