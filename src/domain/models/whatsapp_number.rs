//! WhatsApp Number Value Object
//!
//! Providers address WhatsApp users as `whatsapp:+15551234567`; the domain
//! only ever stores the bare number.

use crate::shared::errors::DomainError;

const CHANNEL_PREFIX: &str = "whatsapp:";

/// Newtype wrapper for a WhatsApp phone number without its channel prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WhatsAppNumber(String);

impl WhatsAppNumber {
    /// Parse a number, stripping any `whatsapp:` prefix and surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhoneNumber` if nothing remains after stripping.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let number = trimmed.strip_prefix(CHANNEL_PREFIX).unwrap_or(trimmed).trim();

        if number.is_empty() {
            return Err(DomainError::InvalidPhoneNumber(raw.to_string()));
        }

        Ok(Self(number.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the provider channel address (`whatsapp:<number>`)
    #[must_use]
    pub fn to_channel_address(&self) -> String {
        format!("{CHANNEL_PREFIX}{}", self.0)
    }
}

impl std::fmt::Display for WhatsAppNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for WhatsAppNumber {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
