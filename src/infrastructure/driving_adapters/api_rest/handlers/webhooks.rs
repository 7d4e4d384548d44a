//! Webhook Handlers
//!
//! Callbacks invoked by the WhatsApp provider. These endpoints are not
//! JWT-protected; the provider cannot present a token.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    routing::post,
    Form, Router,
};

use crate::infrastructure::driving_adapters::api_rest::dto::{
    IncomingMessageForm, StatusCallbackForm,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/twilio", post(incoming_message))
        .route("/status", post(status_callback))
}

/// POST /webhook/twilio - Inbound WhatsApp message
///
/// Answers the message from the author's books and sends the reply back
/// before acknowledging.
///
/// # Responses
///
/// * 200 OK - Reply sent
/// * 400 Bad Request - Malformed form, unusable message, no answer could be produced or delivery failed
/// * 500 Internal Server Error - Storage failure
#[axum::debug_handler(state = AppState)]
async fn incoming_message(
    State(state): State<AppState>,
    form: Result<Form<IncomingMessageForm>, FormRejection>,
) -> Result<StatusCode, ApiError> {
    let Form(form) = form?;
    tracing::info!(from = %form.from, to = %form.to, "Received WhatsApp message");

    let message = state
        .receive_message_use_case
        .execute(&form.body, &form.from, &form.to)?;

    // The reply goes back to the user from the number they wrote to
    let user = message.sender_id.clone();
    let author_number = message.recipient_id.clone();
    let conversation_id = message.conversation_id.clone();

    let reply = state.process_message_use_case.execute(message).await?;

    state
        .send_reply_use_case
        .execute(&reply, &user, &author_number, &conversation_id)
        .await?;

    Ok(StatusCode::OK)
}

/// POST /webhook/status - Delivery status callback
///
/// # Responses
///
/// * 200 OK - Status recorded
/// * 400 Bad Request - Malformed form or missing message id
#[axum::debug_handler(state = AppState)]
async fn status_callback(
    State(state): State<AppState>,
    form: Result<Form<StatusCallbackForm>, FormRejection>,
) -> Result<StatusCode, ApiError> {
    let Form(form) = form?;
    state
        .handle_delivery_status_use_case
        .execute(&form.message_sid, &form.message_status)
        .await?;

    Ok(StatusCode::OK)
}
