use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::{debug, error, warn};

use super::messages::Message;
use crate::{config::LineConfig, error::AppError};

/// The platform accepts at most this many messages per send call.
pub const MAX_MESSAGES_PER_CALL: usize = 5;

#[async_trait]
pub trait MessagingClient: Send + Sync {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), AppError>;
    async fn push(&self, user_id: &str, messages: Vec<Message>) -> Result<(), AppError>;
    async fn get_content(&self, message_id: &str) -> Result<Bytes, AppError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyBody {
    reply_token: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct PushBody {
    to: String,
    messages: Vec<Message>,
}

#[derive(Debug, Clone)]
pub struct LineClient {
    access_token: String,
    api_base: String,
    data_api_base: String,
    client: Client,
}

impl LineClient {
    pub fn new(config: &LineConfig) -> Self {
        Self {
            access_token: config.access_token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            data_api_base: config.data_api_base.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn post_json<T: Serialize + Sync>(&self, url: &str, body: &T) -> Result<(), AppError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        check(response).await.map(|_| ())
    }
}

async fn check(response: Response) -> Result<Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    error!(status, body = %body, "messaging API error");
    Err(AppError::Upstream { status, body })
}

fn cap(mut messages: Vec<Message>) -> Vec<Message> {
    if messages.len() > MAX_MESSAGES_PER_CALL {
        warn!(count = messages.len(), "too many messages; extra ones dropped");
        messages.truncate(MAX_MESSAGES_PER_CALL);
    }
    messages
}

#[async_trait]
impl MessagingClient for LineClient {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), AppError> {
        let url = format!("{}/v2/bot/message/reply", self.api_base);
        let body = ReplyBody { reply_token: reply_token.to_string(), messages: cap(messages) };
        debug!(count = body.messages.len(), "reply");
        self.post_json(&url, &body).await
    }

    async fn push(&self, user_id: &str, messages: Vec<Message>) -> Result<(), AppError> {
        let url = format!("{}/v2/bot/message/push", self.api_base);
        let body = PushBody { to: user_id.to_string(), messages: cap(messages) };
        debug!(%user_id, count = body.messages.len(), "push");
        self.post_json(&url, &body).await
    }

    async fn get_content(&self, message_id: &str) -> Result<Bytes, AppError> {
        let url = format!("{}/v2/bot/message/{}/content", self.data_api_base, message_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let bytes = check(response).await?.bytes().await?;
        debug!(%message_id, size = bytes.len(), "content downloaded");
        Ok(bytes)
    }
}
