//! Language Model Gateway
//!
//! Contract for the large language model that answers in an author's voice.

use async_trait::async_trait;

use crate::domain::models::{Book, ConversationContext, GeneratedResponse};
use crate::shared::errors::GatewayError;

/// Minimum trimmed length of an acceptable reply
pub const MIN_RESPONSE_CHARS: usize = 10;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Answer `query` using the ideas of a single book
    async fn generate_response(
        &self,
        book: &Book,
        conversation: &ConversationContext,
        query: &str,
    ) -> Result<GeneratedResponse, GatewayError>;

    /// Synthesize the per-book answers into one reply
    async fn aggregate_responses(
        &self,
        responses: &[GeneratedResponse],
        query: &str,
    ) -> Result<String, GatewayError>;

    /// Check that a reply is worth sending
    fn validate_response(&self, response: &str) -> bool {
        response.trim().chars().count() >= MIN_RESPONSE_CHARS
    }
}
