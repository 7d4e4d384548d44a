//! Setup Author Use Case
//!
//! Creates or replaces an author from a profile document.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::gateways::{AuthorRepository, UpsertOutcome};
use crate::domain::models::message::Metadata;
use crate::domain::models::{Author, WhatsAppNumber};
use crate::shared::errors::UseCaseError;

/// Author profile as found in the metadata JSON file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorProfile {
    #[serde(default)]
    pub conversation_style: Metadata,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub author_metadata: Metadata,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
}

pub struct SetupAuthorUseCase {
    author_repository: Arc<dyn AuthorRepository>,
}

impl SetupAuthorUseCase {
    #[must_use]
    pub fn new(author_repository: Arc<dyn AuthorRepository>) -> Self {
        Self { author_repository }
    }

    /// Execute the use case
    ///
    /// `whatsapp_number` overrides the number in the profile when given.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` for an empty name,
    /// `UseCaseError::Domain` for an empty number and
    /// `UseCaseError::Repository` if the author cannot be stored.
    pub async fn execute(
        &self,
        name: &str,
        profile: AuthorProfile,
        whatsapp_number: Option<&str>,
    ) -> Result<(Author, UpsertOutcome), UseCaseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UseCaseError::Validation(vec!["author: name must not be empty".to_string()]));
        }

        let whatsapp_number = whatsapp_number
            .or(profile.whatsapp_number.as_deref())
            .map(WhatsAppNumber::parse)
            .transpose()?;

        let author = Author {
            name: name.to_string(),
            whatsapp_number,
            conversation_style: profile.conversation_style,
            bio: profile.bio,
            metadata: profile.author_metadata,
        };

        let outcome = self.author_repository.upsert(&author).await?;
        match outcome {
            UpsertOutcome::Created => tracing::info!(author = name, "Created new author"),
            UpsertOutcome::Updated => tracing::info!(author = name, "Updated existing author"),
        }

        Ok((author, outcome))
    }
}
