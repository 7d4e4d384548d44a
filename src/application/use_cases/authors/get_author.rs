//! Get Author Use Case
//!
//! Retrieves an author together with the titles of their books.

use std::sync::Arc;

use crate::domain::gateways::{AuthorRepository, BookRepository};
use crate::domain::models::Author;
use crate::shared::errors::UseCaseError;

/// An author and the titles of the books they can answer from
#[derive(Debug, Clone)]
pub struct AuthorDetails {
    pub author: Author,
    pub book_titles: Vec<String>,
}

pub struct GetAuthorUseCase {
    author_repository: Arc<dyn AuthorRepository>,
    book_repository: Arc<dyn BookRepository>,
}

impl GetAuthorUseCase {
    #[must_use]
    pub fn new(
        author_repository: Arc<dyn AuthorRepository>,
        book_repository: Arc<dyn BookRepository>,
    ) -> Self {
        Self {
            author_repository,
            book_repository,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the author doesn't exist.
    /// Returns `UseCaseError::Repository` if there's a database error.
    pub async fn execute(&self, name: &str) -> Result<AuthorDetails, UseCaseError> {
        let author = self
            .author_repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| UseCaseError::NotFound {
                resource: "Author".to_string(),
                id: name.to_string(),
            })?;

        let book_titles = self
            .book_repository
            .find_titles_by_author(&author.name)
            .await?;

        Ok(AuthorDetails { author, book_titles })
    }
}
