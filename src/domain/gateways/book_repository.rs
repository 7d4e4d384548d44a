//! Book Repository Gateway

use async_trait::async_trait;

use crate::domain::gateways::UpsertOutcome;
use crate::domain::models::Book;
use crate::shared::errors::RepositoryError;

/// Repository trait for Book persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books by an author, sorted by title ascending
    async fn find_by_author(&self, author: &str) -> Result<Vec<Book>, RepositoryError>;

    /// Titles of an author's books, sorted ascending, without loading their text
    async fn find_titles_by_author(&self, author: &str) -> Result<Vec<String>, RepositoryError>;

    /// Insert the book or replace the stored book with the same author and title
    async fn upsert(&self, book: &Book) -> Result<UpsertOutcome, RepositoryError>;
}
