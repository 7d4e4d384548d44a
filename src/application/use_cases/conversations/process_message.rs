//! Process Message Use Case
//!
//! Turns an incoming user message into the author's reply: resolves the
//! conversation, fans the query out over the author's books, synthesizes the
//! answers and records the exchange.

use std::sync::Arc;
use std::time::Duration;

use crate::application::use_cases::books::ProcessQueryUseCase;
use crate::domain::gateways::{AuthorRepository, ConversationRepository, LanguageModel};
use crate::domain::models::{ConversationContext, ConversationId, Message, WhatsAppNumber};
use crate::shared::errors::{GatewayError, UseCaseError};

pub struct ProcessMessageUseCase {
    author_repository: Arc<dyn AuthorRepository>,
    conversation_repository: Arc<dyn ConversationRepository>,
    process_query: Arc<ProcessQueryUseCase>,
    language_model: Arc<dyn LanguageModel>,
    aggregation_timeout: Duration,
    default_author: Option<String>,
}

impl ProcessMessageUseCase {
    #[must_use]
    pub fn new(
        author_repository: Arc<dyn AuthorRepository>,
        conversation_repository: Arc<dyn ConversationRepository>,
        process_query: Arc<ProcessQueryUseCase>,
        language_model: Arc<dyn LanguageModel>,
        aggregation_timeout: Duration,
    ) -> Self {
        Self {
            author_repository,
            conversation_repository,
            process_query,
            language_model,
            aggregation_timeout,
            default_author: None,
        }
    }

    /// Author used for new conversations when no author owns the number written to
    #[must_use]
    pub fn with_default_author(mut self, author: Option<String>) -> Self {
        self.default_author = author.filter(|a| !a.trim().is_empty());
        self
    }

    /// Execute the use case, returning the reply text
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Conversation` if no author can be resolved or no
    /// book produced an answer, `UseCaseError::Gateway` if aggregation fails,
    /// times out or yields an unusable reply, and `UseCaseError::Repository`
    /// on storage failures.
    pub async fn execute(&self, message: Message) -> Result<String, UseCaseError> {
        let mut context = self.get_or_create_context(&message).await?;

        let responses = self
            .process_query
            .execute(&message.content, context.author_id(), &context)
            .await?;

        if responses.is_empty() {
            tracing::warn!(conversation_id = %context.id(), "No responses generated from books");
            return Err(UseCaseError::Conversation(
                "No responses generated from books".to_string(),
            ));
        }

        let reply = tokio::time::timeout(
            self.aggregation_timeout,
            self.language_model
                .aggregate_responses(&responses, &message.content),
        )
        .await
        .map_err(|_| {
            GatewayError::Llm(format!(
                "Response aggregation timed out after {}s",
                self.aggregation_timeout.as_secs()
            ))
        })??;

        if !self.language_model.validate_response(&reply) {
            tracing::warn!(conversation_id = %context.id(), "Aggregated response failed validation");
            return Err(GatewayError::Llm("Aggregated response failed validation".to_string()).into());
        }

        self.update_context(&mut context, message, &reply).await?;

        tracing::info!(
            conversation_id = %context.id(),
            books = responses.len(),
            "Reply generated"
        );
        Ok(reply)
    }

    /// Load the message's conversation, creating it on first contact
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Conversation` if a new conversation has no
    /// resolvable author, and `UseCaseError::Repository` on storage failures.
    pub async fn get_or_create_context(
        &self,
        message: &Message,
    ) -> Result<ConversationContext, UseCaseError> {
        let id = ConversationId::from(message.conversation_id.as_str());

        if let Some(context) = self.conversation_repository.find_by_id(&id).await? {
            tracing::debug!(conversation_id = %id, "Continuing conversation");
            return Ok(context);
        }

        let author = self.resolve_author(&message.recipient_id).await?;
        let context = ConversationContext::new(id, message.sender_id.clone(), author);
        self.conversation_repository.create(&context).await?;

        tracing::info!(
            conversation_id = %context.id(),
            author = context.author_id(),
            "Started new conversation"
        );
        Ok(context)
    }

    /// Record the user message and the reply, then persist both
    ///
    /// The stored history is appended to rather than overwritten, so replies
    /// computed concurrently for the same conversation are all kept.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if any write fails.
    pub async fn update_context(
        &self,
        context: &mut ConversationContext,
        message: Message,
        reply: &str,
    ) -> Result<(), UseCaseError> {
        let user_message = message.clone();
        let reply_message = context.record_exchange(message, reply);

        self.conversation_repository.store_message(&user_message).await?;
        self.conversation_repository.store_message(&reply_message).await?;
        self.conversation_repository
            .append_messages(context.id(), &[user_message, reply_message])
            .await?;

        Ok(())
    }

    async fn resolve_author(&self, recipient: &str) -> Result<String, UseCaseError> {
        if let Ok(number) = WhatsAppNumber::parse(recipient) {
            if let Some(author) = self.author_repository.find_by_whatsapp_number(&number).await? {
                return Ok(author.name);
            }
        }

        match &self.default_author {
            Some(author) => {
                tracing::debug!(recipient, author = %author, "Using default author");
                Ok(author.clone())
            }
            None => {
                tracing::warn!(recipient, "No author is reachable at this number");
                Err(UseCaseError::Conversation(format!(
                    "No author is reachable at {recipient}"
                )))
            }
        }
    }
}
