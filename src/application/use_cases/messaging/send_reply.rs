//! Send Reply Use Case
//!
//! Delivers the author's reply to the user over the messaging gateway.

use std::sync::Arc;

use crate::domain::gateways::MessagingGateway;
use crate::domain::models::{Message, MessageType};
use crate::shared::errors::UseCaseError;

pub struct SendReplyUseCase {
    messaging_gateway: Arc<dyn MessagingGateway>,
}

impl SendReplyUseCase {
    #[must_use]
    pub fn new(messaging_gateway: Arc<dyn MessagingGateway>) -> Self {
        Self { messaging_gateway }
    }

    /// Execute the use case, returning the provider's message id
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Gateway` if the provider rejects the message.
    pub async fn execute(
        &self,
        content: &str,
        recipient_id: &str,
        sender_id: &str,
        conversation_id: &str,
    ) -> Result<String, UseCaseError> {
        let message = Message::new(
            content,
            sender_id,
            recipient_id,
            conversation_id,
            MessageType::Author,
        );

        let message_id = self.messaging_gateway.send_message(&message).await.map_err(|e| {
            tracing::error!(recipient = recipient_id, error = %e, "Failed to send message");
            e
        })?;

        tracing::info!(recipient = recipient_id, message_id = %message_id, "Reply sent");
        Ok(message_id)
    }
}
