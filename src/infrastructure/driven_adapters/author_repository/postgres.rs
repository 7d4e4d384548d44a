//! PostgreSQL Author Repository Implementation
//!
//! Implements the AuthorRepository trait using SQLx for PostgreSQL.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::gateways::{AuthorRepository, UpsertOutcome};
use crate::domain::models::message::Metadata;
use crate::domain::models::{Author, WhatsAppNumber};
use crate::shared::errors::RepositoryError;

/// Database row representation for authors table
#[derive(Debug, sqlx::FromRow)]
struct AuthorRow {
    name: String,
    whatsapp_number: Option<String>,
    bio: Option<String>,
    conversation_style: Json<Metadata>,
    metadata: Json<Metadata>,
}

impl TryFrom<AuthorRow> for Author {
    type Error = RepositoryError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        let whatsapp_number = row
            .whatsapp_number
            .as_deref()
            .map(WhatsAppNumber::parse)
            .transpose()
            .map_err(|e| RepositoryError::Mapping(format!("Invalid stored whatsapp_number: {e}")))?;

        Ok(Author {
            name: row.name,
            whatsapp_number,
            conversation_style: row.conversation_style.0,
            bio: row.bio,
            metadata: row.metadata.0,
        })
    }
}

/// PostgreSQL implementation of AuthorRepository
pub struct PostgresAuthorRepository {
    pool: PgPool,
}

impl PostgresAuthorRepository {
    /// Create a new PostgresAuthorRepository
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepositoryError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT name, whatsapp_number, bio, conversation_style, metadata
            FROM authors
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(author = name, error = %e, "Failed to retrieve author"))?;

        row.map(Author::try_from).transpose()
    }

    async fn find_by_whatsapp_number(
        &self,
        number: &WhatsAppNumber,
    ) -> Result<Option<Author>, RepositoryError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT name, whatsapp_number, bio, conversation_style, metadata
            FROM authors
            WHERE whatsapp_number = $1
            "#,
        )
        .bind(number.as_str())
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| {
            tracing::error!(number = %number, error = %e, "Failed to retrieve author by WhatsApp number");
        })?;

        row.map(Author::try_from).transpose()
    }

    async fn upsert(&self, author: &Author) -> Result<UpsertOutcome, RepositoryError> {
        // xmax is zero only for freshly inserted tuples
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO authors (name, whatsapp_number, bio, conversation_style, metadata)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO UPDATE
            SET whatsapp_number = EXCLUDED.whatsapp_number,
                bio = EXCLUDED.bio,
                conversation_style = EXCLUDED.conversation_style,
                metadata = EXCLUDED.metadata,
                updated_at = NOW()
            RETURNING (xmax = 0)
            "#,
        )
        .bind(&author.name)
        .bind(author.whatsapp_number.as_ref().map(WhatsAppNumber::as_str))
        .bind(author.bio.as_deref())
        .bind(Json(&author.conversation_style))
        .bind(Json(&author.metadata))
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(author = %author.name, error = %e, "Failed to store author"))?;

        Ok(if inserted {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        })
    }
}
