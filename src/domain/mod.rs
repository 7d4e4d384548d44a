//! Domain Layer
//!
//! Contains the core business logic, domain models, and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::{
    AuthorRepository, BookRepository, ConversationRepository, LanguageModel, MessagingGateway,
    TextExtractor, UpsertOutcome,
};
pub use models::{
    Author, Book, ConversationContext, ConversationId, DeliveryStatus, GeneratedResponse, Message,
    MessageType, WhatsAppNumber,
};
