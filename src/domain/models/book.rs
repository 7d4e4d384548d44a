//! Book Domain Model

use super::message::Metadata;

/// A book by an author, with its full extracted text
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub content: String,
    pub author: String,
    pub publication_year: Option<i32>,
    pub metadata: Metadata,
}

impl Book {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            publication_year: None,
            metadata: Metadata::new(),
        }
    }
}
