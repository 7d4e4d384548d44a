//! Message Domain Model
//!
//! A single message exchanged within a conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form metadata attached to domain records
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    User,
    Author,
    System,
}

impl MessageType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Author => "author",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "author" => Ok(Self::Author),
            "system" => Ok(Self::System),
            other => Err(format!("unknown message type: {other}")),
        }
    }
}

/// A message in a conversation.
///
/// Serialized inline into the conversation document, so the field names are
/// part of the storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sender_id: String,
    pub recipient_id: String,
    pub conversation_id: String,
    pub message_type: MessageType,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Message {
    /// Create a message stamped with the current time
    #[must_use]
    pub fn new(
        content: impl Into<String>,
        sender_id: impl Into<String>,
        recipient_id: impl Into<String>,
        conversation_id: impl Into<String>,
        message_type: MessageType,
    ) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
            sender_id: sender_id.into(),
            recipient_id: recipient_id.into(),
            conversation_id: conversation_id.into(),
            message_type,
            metadata: Metadata::new(),
        }
    }
}
