//! Shared Module
//!
//! Cross-cutting utilities and types used across the application.

pub mod errors;
pub mod secret;

pub use errors::{ApiError, DomainError, GatewayError, RepositoryError, UseCaseError};
pub use secret::Secret;
