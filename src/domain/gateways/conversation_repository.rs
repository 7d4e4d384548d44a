//! Conversation Repository Gateway
//!
//! Persistence for conversation contexts and the individual message log.

use async_trait::async_trait;

use crate::domain::models::{ConversationContext, ConversationId, Message};
use crate::shared::errors::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find a conversation by its ID
    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationContext>, RepositoryError>;

    /// Store a new conversation
    async fn create(&self, conversation: &ConversationContext) -> Result<(), RepositoryError>;

    /// Replace the messages, participants and metadata of an existing conversation
    ///
    /// Returns `RepositoryError::NotFound` if no conversation has the ID.
    async fn update(&self, conversation: &ConversationContext) -> Result<(), RepositoryError>;

    /// Append messages to a conversation's history in one atomic write
    ///
    /// Concurrent appends to the same conversation all land. Returns
    /// `RepositoryError::NotFound` if no conversation has the ID.
    async fn append_messages(
        &self,
        id: &ConversationId,
        messages: &[Message],
    ) -> Result<(), RepositoryError>;

    /// Append a message to the message log
    async fn store_message(&self, message: &Message) -> Result<(), RepositoryError>;
}
