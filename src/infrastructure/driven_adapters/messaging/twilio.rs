//! Twilio WhatsApp Messaging Adapter
//!
//! Sends messages through the Twilio Programmable Messaging REST API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::gateways::MessagingGateway;
use crate::domain::models::{DeliveryStatus, Message, WhatsAppNumber};
use crate::infrastructure::driven_adapters::config::TwilioConfig;
use crate::shared::errors::GatewayError;

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioError {
    #[serde(default)]
    code: Option<i64>,
    message: String,
}

pub struct TwilioMessagingGateway {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioMessagingGateway {
    /// Create a new Twilio gateway
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the account SID is empty or the
    /// HTTP client cannot be built.
    pub fn new(config: TwilioConfig) -> Result<Self, GatewayError> {
        if config.account_sid.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "twilio.account_sid must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    /// Sender address: the message's own sender, or the configured number
    fn from_address(&self, message: &Message) -> Result<String, GatewayError> {
        let sender = WhatsAppNumber::parse(&message.sender_id)
            .or_else(|_| WhatsAppNumber::parse(&self.config.phone_number))
            .map_err(|e| GatewayError::Configuration(format!("No usable sender number: {e}")))?;
        Ok(sender.to_channel_address())
    }
}

#[async_trait]
impl MessagingGateway for TwilioMessagingGateway {
    async fn send_message(&self, message: &Message) -> Result<String, GatewayError> {
        let to = WhatsAppNumber::parse(&message.recipient_id)
            .map_err(|e| GatewayError::MessageDelivery(e.to_string()))?
            .to_channel_address();
        let from = self.from_address(message)?;

        let mut form = vec![
            ("Body", message.content.as_str()),
            ("From", from.as_str()),
            ("To", to.as_str()),
        ];
        if let Some(callback) = self.config.status_callback_url.as_deref() {
            form.push(("StatusCallback", callback));
        }

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(self.config.auth_token.expose()))
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::MessageDelivery(format!("Twilio request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<TwilioError>(&body) {
                Ok(TwilioError { code: Some(code), message }) => format!("{message} (code {code})"),
                Ok(TwilioError { code: None, message }) => message,
                Err(_) => body,
            };
            tracing::error!(%status, to = %to, detail = %detail, "Error sending WhatsApp message");
            return Err(GatewayError::MessageDelivery(format!(
                "Twilio returned {status}: {detail}"
            )));
        }

        let resource: MessageResource = response
            .json()
            .await
            .map_err(|e| GatewayError::MessageDelivery(format!("Invalid Twilio response: {e}")))?;

        tracing::info!(
            sid = %resource.sid,
            status = resource.status.as_deref().unwrap_or("unknown"),
            to = %to,
            "WhatsApp message sent"
        );
        Ok(resource.sid)
    }

    async fn handle_delivery_status(
        &self,
        message_id: &str,
        status: &DeliveryStatus,
    ) -> Result<(), GatewayError> {
        if status.is_failure() {
            tracing::warn!(message_id, %status, "Message delivery failed");
        } else {
            tracing::info!(message_id, %status, "Message status update");
        }
        Ok(())
    }
}
