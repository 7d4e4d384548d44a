//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API and the provider webhooks.

pub mod admin;
pub mod webhook;

pub use admin::{AuthorResponseDto, ConversationResponseDto, UpsertAuthorDto};
pub use webhook::{IncomingMessageForm, StatusCallbackForm};
