//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for external dependencies.
//! These are implemented by driven adapters in the infrastructure layer.

pub mod author_repository;
pub mod book_repository;
pub mod conversation_repository;
pub mod language_model;
pub mod messaging_gateway;
pub mod text_extractor;

pub use author_repository::AuthorRepository;
pub use book_repository::BookRepository;
pub use conversation_repository::ConversationRepository;
pub use language_model::LanguageModel;
pub use messaging_gateway::MessagingGateway;
pub use text_extractor::TextExtractor;

/// Result of an insert-or-update operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}
