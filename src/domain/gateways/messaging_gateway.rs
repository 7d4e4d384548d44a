//! Messaging Gateway
//!
//! Outbound side of the WhatsApp channel. Inbound messages arrive through
//! webhooks, so there is no receive operation.

use async_trait::async_trait;

use crate::domain::models::{DeliveryStatus, Message};
use crate::shared::errors::GatewayError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Deliver a message to its recipient, returning the provider's message id
    async fn send_message(&self, message: &Message) -> Result<String, GatewayError>;

    /// React to a delivery status update for a previously sent message
    async fn handle_delivery_status(
        &self,
        message_id: &str,
        status: &DeliveryStatus,
    ) -> Result<(), GatewayError>;
}
