//! Prompt construction shared by language model adapters.

use crate::domain::models::{Book, ConversationContext, GeneratedResponse};

/// Prompt asking for an answer grounded in one book
pub(crate) fn book_prompt(book: &Book, conversation: &ConversationContext, query: &str) -> String {
    let author = conversation.author_id();
    let history = conversation
        .recent_messages()
        .iter()
        .map(|msg| format!("{}: {}", msg.sender_id, msg.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are helping to simulate a conversation with {author}.\n\
         \n\
         Book Title:\n{title}\n\
         \n\
         Book Content:\n{content}\n\
         \n\
         Previous Conversation:\n{history}\n\
         \n\
         Current Query:\n{query}\n\
         \n\
         Generate a response in the style of {author} based on the ideas present in this specific book.",
        title = book.title,
        content = book.content,
    )
}

/// Prompt asking to merge per-book answers into one reply
pub(crate) fn aggregation_prompt(responses: &[GeneratedResponse], query: &str) -> String {
    let formatted = responses
        .iter()
        .map(|r| format!("From {}:\n{}", r.book_title, r.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "The following are different responses to the query: \"{query}\"\n\
         Each response is generated based on a different book by the author.\n\
         \n\
         {formatted}\n\
         \n\
         Please synthesize these responses into a single, coherent response that:\n\
         1. Captures the key ideas from all relevant books\n\
         2. Maintains the author's voice and style\n\
         3. Presents a unified perspective\n\
         4. Explicitly mentions relevant books when appropriate\n\
         \n\
         Synthesized response:"
    )
}
