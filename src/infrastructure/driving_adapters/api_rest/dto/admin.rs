//! Admin DTOs
//!
//! Data transfer objects for the JWT-protected admin endpoints.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::use_cases::authors::{AuthorDetails, AuthorProfile};
use crate::domain::models::{Author, ConversationContext, Message, Metadata};

lazy_static! {
    /// E.164-style number, optionally carrying the WhatsApp channel prefix
    static ref WHATSAPP_NUMBER_REGEX: Regex =
        Regex::new(r"^(whatsapp:)?\+?[0-9]{6,15}$").expect("valid regex");
}

fn validate_whatsapp_number(number: &str) -> Result<(), validator::ValidationError> {
    if WHATSAPP_NUMBER_REGEX.is_match(number.trim()) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("whatsapp_number");
        error.message = Some("Invalid WhatsApp number (expected +<country code><number>)".into());
        Err(error)
    }
}

/// DTO for creating or replacing an author (PUT)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpsertAuthorDto {
    #[serde(default)]
    pub conversation_style: Metadata,

    #[validate(length(max = 5000, message = "bio must be at most 5000 characters"))]
    pub bio: Option<String>,

    #[serde(default)]
    pub author_metadata: Metadata,

    #[validate(custom(function = "validate_whatsapp_number"))]
    pub whatsapp_number: Option<String>,
}

impl From<UpsertAuthorDto> for AuthorProfile {
    fn from(dto: UpsertAuthorDto) -> Self {
        Self {
            conversation_style: dto.conversation_style,
            bio: dto.bio,
            author_metadata: dto.author_metadata,
            whatsapp_number: dto.whatsapp_number,
        }
    }
}

/// Author response DTO
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponseDto {
    pub name: String,
    pub whatsapp_number: Option<String>,
    pub conversation_style: Metadata,
    pub bio: Option<String>,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<String>>,
}

impl From<Author> for AuthorResponseDto {
    fn from(author: Author) -> Self {
        Self {
            name: author.name,
            whatsapp_number: author.whatsapp_number.map(|n| n.to_string()),
            conversation_style: author.conversation_style,
            bio: author.bio,
            metadata: author.metadata,
            books: None,
        }
    }
}

impl From<AuthorDetails> for AuthorResponseDto {
    fn from(details: AuthorDetails) -> Self {
        Self {
            books: Some(details.book_titles),
            ..Self::from(details.author)
        }
    }
}

/// Conversation transcript response DTO
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponseDto {
    pub id: String,
    pub user_id: String,
    pub author_id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub metadata: Metadata,
}

impl From<ConversationContext> for ConversationResponseDto {
    fn from(context: ConversationContext) -> Self {
        Self {
            id: context.id().to_string(),
            user_id: context.user_id().to_string(),
            author_id: context.author_id().to_string(),
            messages: context.messages().to_vec(),
            created_at: context.created_at(),
            last_updated: context.last_updated(),
            metadata: context.metadata().clone(),
        }
    }
}
