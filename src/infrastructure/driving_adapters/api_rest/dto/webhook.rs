//! Webhook DTOs
//!
//! Form payloads posted by the WhatsApp provider. Unknown fields are ignored.

use serde::Deserialize;

/// Inbound message callback
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessageForm {
    /// Empty for media-only messages
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
}

/// Delivery status callback
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCallbackForm {
    #[serde(rename = "MessageSid")]
    pub message_sid: String,
    #[serde(rename = "MessageStatus")]
    pub message_status: String,
}
