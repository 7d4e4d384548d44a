//! Author Domain Model
//!
//! An author users can converse with. Their books are stored separately and
//! looked up by author name.

use super::message::Metadata;
use super::whatsapp_number::WhatsAppNumber;

#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    /// The number users write to in order to reach this author
    pub whatsapp_number: Option<WhatsAppNumber>,
    pub conversation_style: Metadata,
    pub bio: Option<String>,
    pub metadata: Metadata,
}

impl Author {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            whatsapp_number: None,
            conversation_style: Metadata::new(),
            bio: None,
            metadata: Metadata::new(),
        }
    }

    #[must_use]
    pub fn with_whatsapp_number(mut self, number: WhatsAppNumber) -> Self {
        self.whatsapp_number = Some(number);
        self
    }
}
