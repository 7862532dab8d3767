use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::post,
    Router,
};
use tracing::{debug, instrument, warn};

use super::services::handle_event;
use crate::{
    error::AppError,
    line::{dto::WebhookBody, signature},
    state::AppState,
};

pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhook", post(webhook))
}

/// Verifies the signature before anything else; events are then handled one by one.
#[instrument(skip(state, headers, body))]
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let signature = headers
        .get(signature::SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            warn!("webhook without signature");
            AppError::InvalidSignature
        })?;

    if !signature::verify(&state.config.line.channel_secret, &body, signature) {
        warn!("webhook signature mismatch");
        return Err(AppError::InvalidSignature);
    }

    let payload: WebhookBody = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid webhook body: {e}")))?;
    debug!(destination = ?payload.destination, events = payload.events.len(), "webhook accepted");

    for event in payload.into_events() {
        handle_event(&state, event).await;
    }
    Ok("OK")
}
