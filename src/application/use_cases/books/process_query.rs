//! Process Query Use Case
//!
//! Asks the language model to answer a query once per book of an author.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::domain::gateways::{BookRepository, LanguageModel};
use crate::domain::models::{Book, ConversationContext, GeneratedResponse};
use crate::shared::errors::UseCaseError;

/// Use case fanning a query out over every book of an author
pub struct ProcessQueryUseCase {
    book_repository: Arc<dyn BookRepository>,
    language_model: Arc<dyn LanguageModel>,
    max_concurrent_books: usize,
    response_timeout: Duration,
}

impl ProcessQueryUseCase {
    /// Create a new ProcessQueryUseCase
    ///
    /// `max_concurrent_books` is clamped to at least one.
    #[must_use]
    pub fn new(
        book_repository: Arc<dyn BookRepository>,
        language_model: Arc<dyn LanguageModel>,
        max_concurrent_books: usize,
        response_timeout: Duration,
    ) -> Self {
        Self {
            book_repository,
            language_model,
            max_concurrent_books: max_concurrent_books.max(1),
            response_timeout,
        }
    }

    /// Execute the use case
    ///
    /// Books that fail or exceed the response timeout are logged and left out of
    /// the result. Responses keep the order of the author's books.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Repository` if the books cannot be loaded.
    pub async fn execute(
        &self,
        query: &str,
        author: &str,
        conversation: &ConversationContext,
    ) -> Result<Vec<GeneratedResponse>, UseCaseError> {
        let books = self.book_repository.find_by_author(author).await?;
        if books.is_empty() {
            tracing::warn!(author, "No books found for author");
            return Ok(Vec::new());
        }

        tracing::debug!(
            author,
            books = books.len(),
            max_concurrent = self.max_concurrent_books,
            "Processing query against books"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_books));
        let conversation = Arc::new(conversation.clone());
        let query: Arc<str> = Arc::from(query);

        let handles: Vec<_> = books
            .into_iter()
            .map(|book| {
                let semaphore = Arc::clone(&semaphore);
                let language_model = Arc::clone(&self.language_model);
                let conversation = Arc::clone(&conversation);
                let query = Arc::clone(&query);
                let timeout = self.response_timeout;

                let title = book.title.clone();
                let handle = tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.ok()?;
                    let generation =
                        generate_for_book(language_model.as_ref(), &book, &conversation, &query);

                    match tokio::time::timeout(timeout, generation).await {
                        Ok(Ok(response)) => Some(response),
                        Ok(Err(e)) => {
                            tracing::error!(book = %book.title, error = %e, "Error processing book");
                            None
                        }
                        Err(_) => {
                            tracing::error!(
                                book = %book.title,
                                timeout_secs = timeout.as_secs_f64(),
                                "Processing timed out for book"
                            );
                            None
                        }
                    }
                });
                (title, handle)
            })
            .collect();

        let mut responses = Vec::with_capacity(handles.len());
        for (title, handle) in handles {
            match handle.await {
                Ok(Some(response)) => responses.push(response),
                Ok(None) => {}
                Err(e) => tracing::error!(book = %title, error = %e, "Book task aborted"),
            }
        }

        tracing::info!(author, responses = responses.len(), "Book processing finished");
        Ok(responses)
    }

    /// Answer a query from a single book, without the per-book timeout
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::BookProcessing` naming the book if generation fails.
    pub async fn process_single_book(
        &self,
        book: &Book,
        conversation: &ConversationContext,
        query: &str,
    ) -> Result<GeneratedResponse, UseCaseError> {
        generate_for_book(self.language_model.as_ref(), book, conversation, query).await
    }
}

async fn generate_for_book(
    language_model: &dyn LanguageModel,
    book: &Book,
    conversation: &ConversationContext,
    query: &str,
) -> Result<GeneratedResponse, UseCaseError> {
    language_model
        .generate_response(book, conversation, query)
        .await
        .map_err(|e| {
            tracing::error!(book = %book.title, error = %e, "Single book processing failed");
            UseCaseError::BookProcessing(format!("Failed to process book {}: {e}", book.title))
        })
}
