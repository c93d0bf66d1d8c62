//! Webhook event model.
//!
//! Only the fields the bridge reads are modelled. Unknown event and
//! message types deserialize to `Other` instead of failing the request.

use serde::Deserialize;

/// Top-level webhook request body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user ID that received the events.
    #[serde(default)]
    pub destination: String,
    pub events: Vec<Event>,
}

/// Kind of webhook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Message,
    Follow,
    Unfollow,
    Join,
    Leave,
    Postback,
    Beacon,
    #[serde(other)]
    Other,
}

/// Where the event came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    User {
        #[serde(rename = "userId")]
        user_id: String,
    },
    Group {
        #[serde(rename = "groupId")]
        group_id: String,
    },
    Room {
        #[serde(rename = "roomId")]
        room_id: String,
    },
    #[serde(other)]
    Other,
}

/// Message content of a `message` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text { id: String, text: String },
    #[serde(other)]
    Other,
}

/// A single validated webhook event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventType,
    /// Token for one reply; absent on events that cannot be replied to.
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<Source>,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

/// A text message event that can be replied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMessage<'a> {
    pub reply_token: &'a str,
    pub text: &'a str,
}

impl Event {
    /// The text and reply token, if this is a replyable text message.
    pub fn as_text_message(&self) -> Option<TextMessage<'_>> {
        if self.kind != EventType::Message {
            return None;
        }
        match (&self.message, &self.reply_token) {
            (Some(Message::Text { text, .. }), Some(reply_token)) => Some(TextMessage {
                reply_token,
                text,
            }),
            _ => None,
        }
    }
}
