//! Conversation Use Cases

mod get_conversation;
mod process_message;

pub use get_conversation::GetConversationUseCase;
pub use process_message::ProcessMessageUseCase;
