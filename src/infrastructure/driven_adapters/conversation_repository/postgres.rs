//! PostgreSQL Conversation Repository Implementation
//!
//! Conversations keep their messages inline as a JSONB array; every message
//! is also appended to the `messages` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::gateways::ConversationRepository;
use crate::domain::models::message::Metadata;
use crate::domain::models::{ConversationContext, ConversationId, Message};
use crate::shared::errors::RepositoryError;

/// Database row representation for conversations table
#[derive(Debug, sqlx::FromRow)]
struct ConversationRow {
    id: String,
    user_id: String,
    author_id: String,
    messages: Json<Vec<Message>>,
    metadata: Json<Metadata>,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl From<ConversationRow> for ConversationContext {
    fn from(row: ConversationRow) -> Self {
        ConversationContext::restore(
            ConversationId::from(row.id),
            row.user_id,
            row.author_id,
            row.messages.0,
            row.created_at,
            row.last_updated,
            row.metadata.0,
        )
    }
}

/// PostgreSQL implementation of ConversationRepository
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn find_by_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationContext>, RepositoryError> {
        let row = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT id, user_id, author_id, messages, metadata, created_at, last_updated
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(conversation_id = %id, error = %e, "Failed to retrieve conversation"))?;

        Ok(row.map(ConversationContext::from))
    }

    async fn create(&self, conversation: &ConversationContext) -> Result<(), RepositoryError> {
        // A concurrent first message may have created it already
        let result = sqlx::query(
            r#"
            INSERT INTO conversations (id, user_id, author_id, messages, metadata, created_at, last_updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(conversation.id().as_str())
        .bind(conversation.user_id())
        .bind(conversation.author_id())
        .bind(Json(conversation.messages()))
        .bind(Json(conversation.metadata()))
        .bind(conversation.created_at())
        .bind(conversation.last_updated())
        .execute(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(conversation_id = %conversation.id(), error = %e, "Failed to store conversation"))?;

        if result.rows_affected() > 0 {
            tracing::info!(conversation_id = %conversation.id(), "Stored conversation");
        }
        Ok(())
    }

    async fn update(&self, conversation: &ConversationContext) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET user_id = $2,
                author_id = $3,
                messages = $4,
                metadata = $5,
                last_updated = $6
            WHERE id = $1
            "#,
        )
        .bind(conversation.id().as_str())
        .bind(conversation.user_id())
        .bind(conversation.author_id())
        .bind(Json(conversation.messages()))
        .bind(Json(conversation.metadata()))
        .bind(conversation.last_updated())
        .execute(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(conversation_id = %conversation.id(), error = %e, "Failed to update conversation"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "No conversation found with id: {}",
                conversation.id()
            )));
        }

        tracing::info!(conversation_id = %conversation.id(), "Updated conversation");
        Ok(())
    }

    async fn append_messages(
        &self,
        id: &ConversationId,
        messages: &[Message],
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE conversations
            SET messages = messages || $2,
                last_updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(Json(messages))
        .execute(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(conversation_id = %id, error = %e, "Failed to append messages"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "No conversation found with id: {id}"
            )));
        }

        tracing::info!(conversation_id = %id, appended = messages.len(), "Appended messages");
        Ok(())
    }

    async fn store_message(&self, message: &Message) -> Result<(), RepositoryError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO messages (id, conversation_id, content, sender_id, recipient_id, message_type, metadata, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&message.conversation_id)
        .bind(&message.content)
        .bind(&message.sender_id)
        .bind(&message.recipient_id)
        .bind(message.message_type.as_str())
        .bind(Json(&message.metadata))
        .bind(message.timestamp)
        .execute(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(conversation_id = %message.conversation_id, error = %e, "Failed to store message"))?;

        tracing::debug!(message_id = %id, "Stored message");
        Ok(())
    }
}
