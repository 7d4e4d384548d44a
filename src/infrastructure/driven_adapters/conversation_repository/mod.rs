//! Conversation Repository Implementations

mod postgres;

pub use postgres::PostgresConversationRepository;
