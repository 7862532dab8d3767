use bytes::Bytes;
use tracing::{info, warn};

use super::{
    client::{CompletionClient, CompletionRequest, ImageInput},
    prompts,
};
use crate::{analysis::RawClassification, error::AppError};

const CLASSIFY_MAX_TOKENS: u32 = 600;
const ADVICE_MAX_TOKENS: u32 = 400;

/// Sends the image to the classifier. Non-2xx is an error; unusable text is not.
pub async fn classify(
    client: &dyn CompletionClient,
    image: Bytes,
) -> Result<RawClassification, AppError> {
    let mime_type = mime_from_magic(&image);
    let text = client
        .complete(CompletionRequest {
            system: prompts::FOOD_CLASSIFIER_SYSTEM.to_string(),
            user_text: prompts::FOOD_CLASSIFIER_USER.to_string(),
            image: Some(ImageInput { mime_type, data: image }),
            max_tokens: CLASSIFY_MAX_TOKENS,
        })
        .await?;
    Ok(parse_completion(&text))
}

/// Free-form nutrition advice for a text message.
pub async fn advise(client: &dyn CompletionClient, question: &str) -> Result<String, AppError> {
    let answer = client
        .complete(CompletionRequest {
            system: prompts::ADVISOR_SYSTEM.to_string(),
            user_text: question.to_string(),
            image: None,
            max_tokens: ADVICE_MAX_TOKENS,
        })
        .await?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(AppError::Upstream { status: 200, body: "empty completion".into() });
    }
    Ok(answer.to_string())
}

/// Parses the span from the first `{` to the last `}`; anything else degrades to the fallback.
pub fn parse_completion(text: &str) -> RawClassification {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        warn!("classifier answered without JSON; using fallback");
        return RawClassification::fallback();
    };
    if end < start {
        warn!("classifier braces out of order; using fallback");
        return RawClassification::fallback();
    }
    match serde_json::from_str::<serde_json::Value>(&text[start..=end]) {
        Ok(v) => {
            info!(is_food = ?v.get("is_food"), "classifier answered");
            RawClassification(v)
        }
        Err(e) => {
            warn!(error = %e, "classifier JSON did not parse; using fallback");
            RawClassification::fallback()
        }
    }
}

fn mime_from_magic(data: &[u8]) -> &'static str {
    match data {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}
