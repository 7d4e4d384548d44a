//! Delivery Status Value Object
//!
//! Message status values reported by the WhatsApp provider's status callbacks.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Queued,
    Sending,
    Sent,
    Delivered,
    Read,
    Failed,
    Undelivered,
    Other(String),
}

impl DeliveryStatus {
    /// Parse a provider status string (case-insensitive)
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "queued" | "accepted" => Self::Queued,
            "sending" => Self::Sending,
            "sent" => Self::Sent,
            "delivered" => Self::Delivered,
            "read" => Self::Read,
            "failed" => Self::Failed,
            "undelivered" => Self::Undelivered,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Undelivered)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Sending => "sending",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Read => "read",
            Self::Failed => "failed",
            Self::Undelivered => "undelivered",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(DeliveryStatus::parse("delivered"), DeliveryStatus::Delivered);
        assert_eq!(DeliveryStatus::parse("READ"), DeliveryStatus::Read);
        assert_eq!(DeliveryStatus::parse("accepted"), DeliveryStatus::Queued);
    }

    #[test]
    fn keeps_unknown_statuses_verbatim() {
        let status = DeliveryStatus::parse("receiving");
        assert_eq!(status, DeliveryStatus::Other("receiving".to_string()));
        assert_eq!(status.to_string(), "receiving");
        assert!(!status.is_failure());
    }

    #[test]
    fn failed_and_undelivered_are_failures() {
        assert!(DeliveryStatus::parse("failed").is_failure());
        assert!(DeliveryStatus::parse("undelivered").is_failure());
        assert!(!DeliveryStatus::parse("sent").is_failure());
    }
}
