//! Author Repository Gateway

use async_trait::async_trait;

use crate::domain::gateways::UpsertOutcome;
use crate::domain::models::{Author, WhatsAppNumber};
use crate::shared::errors::RepositoryError;

/// Repository trait for Author persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find an author by name
    async fn find_by_name(&self, name: &str) -> Result<Option<Author>, RepositoryError>;

    /// Find the author reachable at a WhatsApp number
    async fn find_by_whatsapp_number(
        &self,
        number: &WhatsAppNumber,
    ) -> Result<Option<Author>, RepositoryError>;

    /// Insert the author or replace the stored author with the same name
    async fn upsert(&self, author: &Author) -> Result<UpsertOutcome, RepositoryError>;
}
