//! Setup Books Use Case
//!
//! Loads every PDF in a directory as a book of an existing author.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::gateways::{AuthorRepository, BookRepository, TextExtractor, UpsertOutcome};
use crate::domain::models::message::Metadata;
use crate::domain::models::Book;
use crate::shared::errors::UseCaseError;

/// Optional per-title book metadata, as found in the metadata JSON file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookCatalog {
    #[serde(default)]
    pub books: HashMap<String, BookCatalogEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookCatalogEntry {
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Summary of a setup run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupBooksReport {
    pub total: usize,
    pub stored: usize,
}

pub struct SetupBooksUseCase {
    author_repository: Arc<dyn AuthorRepository>,
    book_repository: Arc<dyn BookRepository>,
    text_extractor: Arc<dyn TextExtractor>,
}

impl SetupBooksUseCase {
    #[must_use]
    pub fn new(
        author_repository: Arc<dyn AuthorRepository>,
        book_repository: Arc<dyn BookRepository>,
        text_extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            author_repository,
            book_repository,
            text_extractor,
        }
    }

    /// Execute the use case
    ///
    /// Each `*.pdf` file becomes a book titled by its file stem. Files whose
    /// text cannot be extracted are skipped.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::NotFound` if the author does not exist,
    /// `UseCaseError::Validation` if the directory holds no PDF files and
    /// `UseCaseError::BookProcessing` if no book could be stored.
    pub async fn execute(
        &self,
        author: &str,
        books_dir: &Path,
        catalog: &BookCatalog,
    ) -> Result<SetupBooksReport, UseCaseError> {
        if self.author_repository.find_by_name(author).await?.is_none() {
            tracing::error!(author, "Author not found in database");
            return Err(UseCaseError::NotFound {
                resource: "Author".to_string(),
                id: author.to_string(),
            });
        }

        let pdf_files = list_pdf_files(books_dir)?;
        if pdf_files.is_empty() {
            tracing::error!(dir = %books_dir.display(), "No PDF files found");
            return Err(UseCaseError::Validation(vec![format!(
                "No PDF files found in {}",
                books_dir.display()
            )]));
        }

        let mut stored = 0;
        for pdf_file in &pdf_files {
            let Some(title) = pdf_file.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(file = %pdf_file.display(), "Skipping file with non UTF-8 name");
                continue;
            };

            let extractor = Arc::clone(&self.text_extractor);
            let path = pdf_file.clone();
            let content = tokio::task::spawn_blocking(move || extractor.extract_text(&path))
                .await
                .ok()
                .flatten();

            let Some(content) = content.filter(|c| !c.trim().is_empty()) else {
                tracing::error!(file = %pdf_file.display(), "Failed to extract content");
                continue;
            };

            let entry = catalog.books.get(title).cloned().unwrap_or_default();
            let book = Book {
                title: title.to_string(),
                content,
                author: author.to_string(),
                publication_year: entry.publication_year,
                metadata: entry.metadata,
            };

            match self.book_repository.upsert(&book).await {
                Ok(UpsertOutcome::Created) => {
                    tracing::info!(title, "Created new book");
                    stored += 1;
                }
                Ok(UpsertOutcome::Updated) => {
                    tracing::info!(title, "Updated existing book");
                    stored += 1;
                }
                Err(e) => tracing::error!(title, error = %e, "Failed to store book"),
            }
        }

        let report = SetupBooksReport {
            total: pdf_files.len(),
            stored,
        };
        tracing::info!(
            stored = report.stored,
            total = report.total,
            "Successfully processed {} out of {} books",
            report.stored,
            report.total
        );

        if report.stored == 0 {
            return Err(UseCaseError::BookProcessing(format!(
                "None of the {} PDF files in {} could be stored",
                report.total,
                books_dir.display()
            )));
        }

        Ok(report)
    }
}

/// `*.pdf` files directly inside `dir`, sorted by file name
fn list_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, UseCaseError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        UseCaseError::Validation(vec![format!("Cannot read books directory {}: {e}", dir.display())])
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == "pdf")
        })
        .collect();
    files.sort();
    Ok(files)
}
