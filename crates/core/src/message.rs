use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation parameter stamped on every outgoing user message.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Opaque message identifier, doubling as the correlation token sent to the
/// chat service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    System,
    Bot,
    User,
}

impl Author {
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::System => "system",
            Author::Bot => "bot",
            Author::User => "user",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript entry.
///
/// The serialized form is the wire shape the chat service expects, so field
/// names are camelCase and optional fields are omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    /// Creation time in epoch milliseconds
    pub sent_at: i64,
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub failed_to_send: bool,
}

impl Message {
    fn new(id: MessageId, sent_at: i64, author: Author, message: impl Into<String>) -> Self {
        Self {
            id,
            sent_at,
            author,
            username: None,
            user_id: None,
            message: message.into(),
            temperature: None,
            failed_to_send: false,
        }
    }

    pub fn system(id: MessageId, sent_at: i64, message: impl Into<String>) -> Self {
        Self::new(id, sent_at, Author::System, message)
    }

    pub fn user(id: MessageId, sent_at: i64, message: impl Into<String>) -> Self {
        Self::new(id, sent_at, Author::User, message)
    }

    pub fn bot(id: MessageId, sent_at: i64, message: impl Into<String>) -> Self {
        Self::new(id, sent_at, Author::Bot, message)
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Copy of this message flagged as undeliverable. Text and id are kept.
    pub fn mark_failed(&self) -> Self {
        Self { failed_to_send: true, ..self.clone() }
    }

    pub fn is_system(&self) -> bool {
        self.author == Author::System
    }

    /// Whether this message belongs in the conversation sent to the service.
    pub fn is_deliverable(&self) -> bool {
        !self.is_system() && !self.failed_to_send
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// The two system notices a fresh conversation starts with.
pub fn welcome_messages(bot_name: &str, ids: &dyn crate::IdGenerator) -> Vec<Message> {
    let now = now_millis();
    vec![
        Message::system(
            ids.next_id(),
            now,
            format!("Welcome to {}! Send a message to initiate a conversation.", bot_name),
        ),
        Message::system(
            ids.next_id(),
            now,
            format!("{} is unstable and no warranties are given unless by applicable law.", bot_name),
        ),
    ]
}
