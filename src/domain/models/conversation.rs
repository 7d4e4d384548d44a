//! Conversation Domain Model
//!
//! Represents the ongoing conversation between one user and one author.

use chrono::{DateTime, Utc};

use super::message::{Message, MessageType, Metadata};
use super::whatsapp_number::WhatsAppNumber;

/// Number of trailing messages included as history in prompts
pub const HISTORY_WINDOW: usize = 5;

/// Conversation identifier, `"<user_number>:<author_number>"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationId(String);

impl ConversationId {
    /// Derive the id for a user writing to an author's number
    #[must_use]
    pub fn for_participants(user: &WhatsAppNumber, author: &WhatsAppNumber) -> Self {
        Self(format!("{user}:{author}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The author number half of the id, if the id has one
    #[must_use]
    pub fn author_number(&self) -> Option<&str> {
        self.0
            .rsplit_once(':')
            .map(|(_, author)| author)
            .filter(|author| !author.is_empty())
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConversationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ConversationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Conversation context entity
#[derive(Debug, Clone)]
pub struct ConversationContext {
    id: ConversationId,
    user_id: String,
    author_id: String,
    messages: Vec<Message>,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    metadata: Metadata,
}

impl ConversationContext {
    /// Start an empty conversation
    #[must_use]
    pub fn new(id: ConversationId, user_id: impl Into<String>, author_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: user_id.into(),
            author_id: author_id.into(),
            messages: Vec::new(),
            created_at: now,
            last_updated: now,
            metadata: Metadata::new(),
        }
    }

    /// Restore a conversation from persisted data
    #[must_use]
    pub fn restore(
        id: ConversationId,
        user_id: String,
        author_id: String,
        messages: Vec<Message>,
        created_at: DateTime<Utc>,
        last_updated: DateTime<Utc>,
        metadata: Metadata,
    ) -> Self {
        Self {
            id,
            user_id,
            author_id,
            messages,
            created_at,
            last_updated,
            metadata,
        }
    }

    /// Append the user's message and the author's reply, returning the reply message
    pub fn record_exchange(&mut self, user_message: Message, reply: impl Into<String>) -> Message {
        let author_number = self
            .id
            .author_number()
            .map_or_else(|| self.author_id.clone(), str::to_string);

        let reply = Message::new(
            reply,
            author_number,
            user_message.sender_id.clone(),
            self.id.as_str(),
            MessageType::Author,
        );

        self.messages.push(user_message);
        self.messages.push(reply.clone());
        self.last_updated = Utc::now();

        reply
    }

    /// The last [`HISTORY_WINDOW`] messages, oldest first
    #[must_use]
    pub fn recent_messages(&self) -> &[Message] {
        let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        &self.messages[start..]
    }

    // Getters

    #[must_use]
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    #[must_use]
    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(raw: &str) -> WhatsAppNumber {
        WhatsAppNumber::parse(raw).unwrap()
    }

    fn user_message(context: &ConversationContext, content: &str) -> Message {
        Message::new(content, "+15550001", "+15559999", context.id().as_str(), MessageType::User)
    }

    #[test]
    fn conversation_id_is_stable_for_the_same_participants() {
        let first = ConversationId::for_participants(&number("+15550001"), &number("whatsapp:+15559999"));
        let second = ConversationId::for_participants(&number("whatsapp:+15550001"), &number("+15559999"));

        assert_eq!(first, second);
        assert_eq!(first.as_str(), "+15550001:+15559999");
        assert_eq!(first.author_number(), Some("+15559999"));
    }

    #[test]
    fn author_number_is_absent_for_legacy_ids() {
        assert_eq!(ConversationId::from("5f1c0c5e").author_number(), None);
        assert_eq!(ConversationId::from("+1555:").author_number(), None);
    }

    #[test]
    fn record_exchange_appends_user_message_then_reply() {
        let id = ConversationId::for_participants(&number("+15550001"), &number("+15559999"));
        let mut context = ConversationContext::new(id, "+15550001", "Slavoj Zizek");
        let before = context.last_updated();

        let message = user_message(&context, "What is ideology?");
        let reply = context.record_exchange(message, "Ideology is not simply false consciousness...");

        assert_eq!(context.messages().len(), 2);
        assert_eq!(context.messages()[0].message_type, MessageType::User);
        assert_eq!(context.messages()[1], reply);
        assert_eq!(reply.message_type, MessageType::Author);
        assert_eq!(reply.sender_id, "+15559999");
        assert_eq!(reply.recipient_id, "+15550001");
        assert_eq!(reply.conversation_id, "+15550001:+15559999");
        assert!(context.last_updated() >= before);
    }

    #[test]
    fn recent_messages_keeps_last_five() {
        let id = ConversationId::from("+15550001:+15559999");
        let mut context = ConversationContext::new(id, "+15550001", "Slavoj Zizek");

        for i in 0..4 {
            let message = user_message(&context, &format!("question {i}"));
            context.record_exchange(message, format!("answer {i}"));
        }

        let recent = context.recent_messages();
        assert_eq!(recent.len(), HISTORY_WINDOW);
        assert_eq!(recent[0].content, "answer 1");
        assert_eq!(recent[4].content, "answer 3");
    }

    #[test]
    fn recent_messages_of_short_conversation_is_everything() {
        let context = ConversationContext::new("a:b".into(), "a", "Author");
        assert!(context.recent_messages().is_empty());
    }
}
