//! Get Conversation Use Case
//!
//! Retrieves a conversation transcript by its ID.

use std::sync::Arc;

use crate::domain::gateways::ConversationRepository;
use crate::domain::models::{ConversationContext, ConversationId};
use crate::shared::errors::UseCaseError;

/// Use case for getting a conversation by ID
pub struct GetConversationUseCase {
    conversation_repository: Arc<dyn ConversationRepository>,
}

impl GetConversationUseCase {
    /// Create a new GetConversationUseCase
    #[must_use]
    pub fn new(conversation_repository: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversation_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the conversation doesn't exist.
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, id: &ConversationId) -> Result<ConversationContext, UseCaseError> {
        tracing::debug!(conversation_id = %id, "Getting conversation by ID");

        self.conversation_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(conversation_id = %id, "Conversation not found");
                UseCaseError::NotFound {
                    resource: "Conversation".to_string(),
                    id: id.to_string(),
                }
            })
    }
}
