use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Webhook request body. Events stay raw so one odd event can't sink the batch.
#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<Value>,
}

impl WebhookBody {
    /// Events in delivery order; malformed ones are logged and skipped.
    pub fn into_events(self) -> Vec<Event> {
        self.events
            .into_iter()
            .enumerate()
            .filter_map(|(i, raw)| match serde_json::from_value::<Event>(raw) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(index = i, error = %e, "skipping malformed webhook event");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Message {
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        source: Source,
        message: EventMessage,
    },
    Postback {
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        source: Source,
        postback: Postback,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
pub struct Source {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventMessage {
    Text {
        text: String,
    },
    Image {
        id: String,
    },
    Location {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        address: Option<String>,
        latitude: f64,
        longitude: f64,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
pub struct Postback {
    pub data: String,
}
