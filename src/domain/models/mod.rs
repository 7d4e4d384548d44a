//! Domain Models
//!
//! Pure domain entities and value objects representing business concepts.

pub mod author;
pub mod book;
pub mod conversation;
pub mod delivery_status;
pub mod generated_response;
pub mod message;
pub mod whatsapp_number;

pub use author::Author;
pub use book::Book;
pub use conversation::{ConversationContext, ConversationId};
pub use delivery_status::DeliveryStatus;
pub use generated_response::GeneratedResponse;
pub use message::{Message, MessageType, Metadata};
pub use whatsapp_number::WhatsAppNumber;
