//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the webhooks and the
//! admin API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::use_cases::{
    GetAuthorUseCase, GetConversationUseCase, HandleDeliveryStatusUseCase, ProcessMessageUseCase,
    ProcessQueryUseCase, ReceiveMessageUseCase, SendReplyUseCase, SetupAuthorUseCase,
};
use crate::infrastructure::driven_adapters::config::AppConfig;
use crate::infrastructure::driven_adapters::{
    create_language_model, PostgresAuthorRepository, PostgresBookRepository,
    PostgresConversationRepository, TwilioMessagingGateway,
};
use crate::shared::errors::GatewayError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub receive_message_use_case: Arc<ReceiveMessageUseCase>,
    pub process_message_use_case: Arc<ProcessMessageUseCase>,
    pub send_reply_use_case: Arc<SendReplyUseCase>,
    pub handle_delivery_status_use_case: Arc<HandleDeliveryStatusUseCase>,
    pub setup_author_use_case: Arc<SetupAuthorUseCase>,
    pub get_author_use_case: Arc<GetAuthorUseCase>,
    pub get_conversation_use_case: Arc<GetConversationUseCase>,
}

impl AppState {
    /// Wire the PostgreSQL repositories and provider clients into the use cases
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if a provider client cannot be
    /// created from the configuration.
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, GatewayError> {
        let author_repository = Arc::new(PostgresAuthorRepository::new(pool.clone()));
        let book_repository = Arc::new(PostgresBookRepository::new(pool.clone()));
        let conversation_repository = Arc::new(PostgresConversationRepository::new(pool));

        let language_model = create_language_model(&config.llm)?;
        let messaging_gateway = Arc::new(TwilioMessagingGateway::new(config.twilio.clone())?);

        let process_query_use_case = Arc::new(ProcessQueryUseCase::new(
            book_repository.clone(),
            language_model.clone(),
            config.processing.max_concurrent_books,
            config.processing.response_timeout(),
        ));
        let process_message_use_case = ProcessMessageUseCase::new(
            author_repository.clone(),
            conversation_repository.clone(),
            process_query_use_case,
            language_model,
            config.processing.aggregation_timeout(),
        )
        .with_default_author(config.processing.default_author.clone());

        Ok(Self {
            receive_message_use_case: Arc::new(ReceiveMessageUseCase::new()),
            process_message_use_case: Arc::new(process_message_use_case),
            send_reply_use_case: Arc::new(SendReplyUseCase::new(messaging_gateway.clone())),
            handle_delivery_status_use_case: Arc::new(HandleDeliveryStatusUseCase::new(
                messaging_gateway,
            )),
            setup_author_use_case: Arc::new(SetupAuthorUseCase::new(author_repository.clone())),
            get_author_use_case: Arc::new(GetAuthorUseCase::new(author_repository, book_repository)),
            get_conversation_use_case: Arc::new(GetConversationUseCase::new(
                conversation_repository,
            )),
            config: Arc::new(config),
        })
    }
}

/// Build the full HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/webhook", handlers::webhooks::router())
        .nest("/health", handlers::health::router())
        .nest("/admin", handlers::admin::router())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
