//! Admin Handlers
//!
//! Author management and conversation inspection for operators.
//! All endpoints require JWT authentication.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::domain::gateways::UpsertOutcome;
use crate::domain::models::ConversationId;
use crate::infrastructure::driving_adapters::api_rest::dto::{
    AuthorResponseDto, ConversationResponseDto, UpsertAuthorDto,
};
use crate::infrastructure::driving_adapters::api_rest::middleware::JwtAuth;
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors/:name", get(get_author).put(upsert_author))
        .route("/conversations/:id", get(get_conversation))
}

/// PUT /admin/authors/:name - Create or replace an author
///
/// # Responses
///
/// * 201 Created - Author created
/// * 200 OK - Existing author replaced
/// * 400 Bad Request - Validation error
/// * 401 Unauthorized - Missing or invalid JWT token
#[axum::debug_handler(state = AppState)]
async fn upsert_author(
    JwtAuth(operator): JwtAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(dto): Json<UpsertAuthorDto>,
) -> Result<(StatusCode, Json<AuthorResponseDto>), ApiError> {
    dto.validate()?;

    let (author, outcome) = state
        .setup_author_use_case
        .execute(&name, dto.into(), None)
        .await?;

    tracing::info!(operator = %operator.id, author = %author.name, ?outcome, "Author saved via admin API");

    let status = match outcome {
        UpsertOutcome::Created => StatusCode::CREATED,
        UpsertOutcome::Updated => StatusCode::OK,
    };
    Ok((status, Json(AuthorResponseDto::from(author))))
}

/// GET /admin/authors/:name - Author with the titles of their books
///
/// # Responses
///
/// * 200 OK - Author found
/// * 401 Unauthorized - Missing or invalid JWT token
/// * 404 Not Found - Author does not exist
#[axum::debug_handler(state = AppState)]
async fn get_author(
    _auth: JwtAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<AuthorResponseDto>, ApiError> {
    let details = state.get_author_use_case.execute(&name).await?;
    Ok(Json(AuthorResponseDto::from(details)))
}

/// GET /admin/conversations/:id - Conversation transcript
///
/// The id is `<user number>:<author number>`.
///
/// # Responses
///
/// * 200 OK - Conversation found
/// * 401 Unauthorized - Missing or invalid JWT token
/// * 404 Not Found - Conversation does not exist
#[axum::debug_handler(state = AppState)]
async fn get_conversation(
    _auth: JwtAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationResponseDto>, ApiError> {
    let conversation = state
        .get_conversation_use_case
        .execute(&ConversationId::from(id))
        .await?;
    Ok(Json(ConversationResponseDto::from(conversation)))
}
