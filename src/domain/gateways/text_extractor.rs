//! Text Extractor Gateway
//!
//! Turns a book file on disk into plain text.

use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of a document, or `None` if it cannot be read
    fn extract_text(&self, path: &Path) -> Option<String>;
}
