use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{info, instrument};

use super::services::classify;
use crate::{
    analysis::{interpret, ClassificationResult},
    error::AppError,
    state::AppState,
};

pub fn classify_routes() -> Router<AppState> {
    Router::new()
        .route("/classify", post(classify_upload))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// POST /classify (multipart, field `file`)
#[instrument(skip(state, mp))]
pub async fn classify_upload(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<ClassificationResult>, AppError> {
    let mut image: Option<Bytes> = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let data = field.bytes().await.map_err(|e| AppError::BadRequest(e.to_string()))?;
            image = Some(data);
        }
    }
    let image = match image {
        Some(data) if !data.is_empty() => data,
        _ => return Err(AppError::BadRequest("file is required".into())),
    };

    info!(bytes = image.len(), "classifying upload");
    let raw = classify(state.completion.as_ref(), image).await?;
    Ok(Json(interpret(&raw)))
}
