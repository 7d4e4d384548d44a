//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Database repositories
//! - Configuration
//! - Language model and WhatsApp provider clients
//! - PDF text extraction

pub mod author_repository;
pub mod book_repository;
pub mod config;
pub mod conversation_repository;
pub mod database;
pub mod llm;
pub mod messaging;
pub mod pdf;

pub use author_repository::PostgresAuthorRepository;
pub use book_repository::PostgresBookRepository;
pub use config::AppConfig;
pub use conversation_repository::PostgresConversationRepository;
pub use llm::{create_language_model, GeminiLanguageModel};
pub use messaging::TwilioMessagingGateway;
pub use pdf::PdfTextExtractor;
