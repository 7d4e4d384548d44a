//! Generated Response Domain Model

use chrono::{DateTime, Utc};

use super::message::Metadata;

/// An answer to a query generated from a single book
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedResponse {
    pub book_title: String,
    pub content: String,
    /// The Gemini API reports no confidence, so this is 0.0 for every provider we support
    pub confidence_score: f64,
    pub generation_time: DateTime<Utc>,
    pub metadata: Metadata,
}

impl GeneratedResponse {
    #[must_use]
    pub fn new(book_title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            book_title: book_title.into(),
            content: content.into(),
            confidence_score: 0.0,
            generation_time: Utc::now(),
            metadata: Metadata::new(),
        }
    }
}
