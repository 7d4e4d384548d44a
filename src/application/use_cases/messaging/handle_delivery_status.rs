//! Handle Delivery Status Use Case

use std::sync::Arc;

use crate::domain::gateways::MessagingGateway;
use crate::domain::models::DeliveryStatus;
use crate::shared::errors::UseCaseError;

pub struct HandleDeliveryStatusUseCase {
    messaging_gateway: Arc<dyn MessagingGateway>,
}

impl HandleDeliveryStatusUseCase {
    #[must_use]
    pub fn new(messaging_gateway: Arc<dyn MessagingGateway>) -> Self {
        Self { messaging_gateway }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if the message id is missing and
    /// `UseCaseError::Gateway` if the gateway fails to handle the update.
    pub async fn execute(&self, message_id: &str, status: &str) -> Result<DeliveryStatus, UseCaseError> {
        if message_id.trim().is_empty() {
            return Err(UseCaseError::Validation(vec![
                "MessageSid: missing message id".to_string(),
            ]));
        }

        let status = DeliveryStatus::parse(status);
        self.messaging_gateway
            .handle_delivery_status(message_id, &status)
            .await?;

        Ok(status)
    }
}
