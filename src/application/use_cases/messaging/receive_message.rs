//! Receive Message Use Case
//!
//! Converts the raw fields of an inbound WhatsApp message into a domain message.

use crate::domain::models::{ConversationId, Message, MessageType, WhatsAppNumber};
use crate::shared::errors::UseCaseError;

#[derive(Debug, Default)]
pub struct ReceiveMessageUseCase;

impl ReceiveMessageUseCase {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Execute the use case
    ///
    /// Sender and recipient may carry the `whatsapp:` channel prefix.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Domain` if either number is empty and
    /// `UseCaseError::Validation` if the message has no content.
    pub fn execute(&self, content: &str, sender: &str, recipient: &str) -> Result<Message, UseCaseError> {
        let sender = WhatsAppNumber::parse(sender)?;
        let recipient = WhatsAppNumber::parse(recipient)?;

        if content.trim().is_empty() {
            return Err(UseCaseError::Validation(vec!["Body: message has no text".to_string()]));
        }

        let conversation_id = ConversationId::for_participants(&sender, &recipient);
        let message = Message::new(
            content,
            sender.as_str(),
            recipient.as_str(),
            conversation_id.as_str(),
            MessageType::User,
        );

        tracing::info!(sender = %sender, conversation_id = %conversation_id, "Processed incoming message");
        Ok(message)
    }
}
