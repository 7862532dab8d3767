use serde::Serialize;

/// Platform limits, in chars.
pub const MAX_TEXT_CHARS: usize = 5000;
pub const MAX_ALT_TEXT_CHARS: usize = 1500;

/// Outbound message in the platform's send-API shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text {
        text: String,
        #[serde(rename = "quickReply", skip_serializing_if = "Option::is_none")]
        quick_reply: Option<QuickReply>,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: serde_json::Value,
    },
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text { text: truncate(text.into(), MAX_TEXT_CHARS), quick_reply: None }
    }

    pub fn text_with_actions(text: impl Into<String>, actions: Vec<Action>) -> Self {
        Message::Text {
            text: truncate(text.into(), MAX_TEXT_CHARS),
            quick_reply: Some(QuickReply {
                items: actions.into_iter().map(QuickReplyItem::new).collect(),
            }),
        }
    }

    pub fn flex(alt_text: impl Into<String>, contents: serde_json::Value) -> Self {
        Message::Flex { alt_text: truncate(alt_text.into(), MAX_ALT_TEXT_CHARS), contents }
    }
}

fn truncate(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((end, _)) => s[..end].to_string(),
        None => s,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReply {
    pub items: Vec<QuickReplyItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReplyItem {
    #[serde(rename = "type")]
    kind: &'static str,
    pub action: Action,
}

impl QuickReplyItem {
    fn new(action: Action) -> Self {
        Self { kind: "action", action }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    Postback {
        label: String,
        data: String,
        #[serde(rename = "displayText")]
        display_text: String,
    },
    Location {
        label: String,
    },
    Camera {
        label: String,
    },
    CameraRoll {
        label: String,
    },
}
