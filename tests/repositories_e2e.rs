//! Repository tests against a real PostgreSQL database

mod common;

use author_chat::domain::gateways::{BookRepository, ConversationRepository, UpsertOutcome};
use author_chat::domain::models::{Book, ConversationContext, ConversationId, Message, MessageType};
use author_chat::infrastructure::driven_adapters::{
    PostgresBookRepository, PostgresConversationRepository,
};
use author_chat::shared::errors::RepositoryError;

use common::{TestApp, AUTHOR_NAME, USER_NUMBER};

const CONVERSATION_ID: &str = "+15550001:+15559999";

fn user_message(content: &str) -> Message {
    Message::new(content, USER_NUMBER, "+15559999", CONVERSATION_ID, MessageType::User)
}

// ============================================================================
// PostgresConversationRepository
// ============================================================================

#[tokio::test]
async fn test_update_unknown_conversation_is_not_found() {
    let app = TestApp::new().await;
    let repo = PostgresConversationRepository::new(app.pool.clone());

    let context = ConversationContext::new(ConversationId::from("missing"), USER_NUMBER, AUTHOR_NAME);
    let err = repo.update(&context).await.unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[tokio::test]
async fn test_update_replaces_stored_conversation() {
    let app = TestApp::new().await;
    let repo = PostgresConversationRepository::new(app.pool.clone());
    let mut context =
        ConversationContext::new(ConversationId::from(CONVERSATION_ID), USER_NUMBER, AUTHOR_NAME);
    repo.create(&context).await.unwrap();

    context.record_exchange(user_message("What is the Real?"), "The Real is the gap.");
    repo.update(&context).await.unwrap();

    let stored = repo.find_by_id(context.id()).await.unwrap().unwrap();
    assert_eq!(stored.messages().len(), 2);
    assert_eq!(stored.messages()[1].message_type, MessageType::Author);
}

#[tokio::test]
async fn test_concurrent_appends_keep_every_message() {
    let app = TestApp::new().await;
    let repo = PostgresConversationRepository::new(app.pool.clone());
    let id = ConversationId::from(CONVERSATION_ID);
    repo.create(&ConversationContext::new(id.clone(), USER_NUMBER, AUTHOR_NAME))
        .await
        .unwrap();

    let first = [user_message("one")];
    let second = [user_message("two")];
    let (a, b) = tokio::join!(
        repo.append_messages(&id, &first),
        repo.append_messages(&id, &second),
    );
    a.unwrap();
    b.unwrap();

    let stored = repo.find_by_id(&id).await.unwrap().unwrap();
    let mut contents: Vec<_> = stored.messages().iter().map(|m| m.content.as_str()).collect();
    contents.sort_unstable();
    assert_eq!(contents, ["one", "two"]);
}

#[tokio::test]
async fn test_append_to_unknown_conversation_is_not_found() {
    let app = TestApp::new().await;
    let repo = PostgresConversationRepository::new(app.pool.clone());

    let err = repo
        .append_messages(&ConversationId::from("missing"), &[user_message("hello")])
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound(_)));
}

// ============================================================================
// PostgresBookRepository
// ============================================================================

#[tokio::test]
async fn test_book_upsert_reports_created_then_updated() {
    let app = TestApp::new().await;
    app.seed_author_with_books(&[]).await;
    let repo = PostgresBookRepository::new(app.pool.clone());

    let outcome = repo
        .upsert(&Book::new("Less Than Nothing", "first draft", AUTHOR_NAME))
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Created);

    let outcome = repo
        .upsert(&Book::new("Less Than Nothing", "final text", AUTHOR_NAME))
        .await
        .unwrap();
    assert_eq!(outcome, UpsertOutcome::Updated);

    let books = repo.find_by_author(AUTHOR_NAME).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].content, "final text");
}

#[tokio::test]
async fn test_book_titles_are_sorted() {
    let app = TestApp::new().await;
    app.seed_author_with_books(&["The Parallax View", "Less Than Nothing"]).await;
    let repo = PostgresBookRepository::new(app.pool.clone());

    let titles = repo.find_titles_by_author(AUTHOR_NAME).await.unwrap();

    assert_eq!(titles, ["Less Than Nothing", "The Parallax View"]);
    assert!(repo.find_titles_by_author("Nobody").await.unwrap().is_empty());
}
