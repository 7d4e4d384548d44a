//! Error Types
//!
//! Layered error types with HTTP status code mapping for the webhook and admin APIs.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Domain-level errors representing invalid values or states
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid WhatsApp number: {0:?}")]
    InvalidPhoneNumber(String),
}

/// Repository-level errors for data access failures
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Data mapping error: {0}")]
    Mapping(String),
}

/// Errors raised by outbound service gateways (LLM, messaging provider)
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Message delivery error: {0}")]
    MessageDelivery(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },

    #[error("Conversation error: {0}")]
    Conversation(String),

    #[error("Book processing error: {0}")]
    BookProcessing(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Conversation(_)
            | Self::BookProcessing(_)
            | Self::Domain(_)
            | Self::Gateway(GatewayError::Llm(_) | GatewayError::MessageDelivery(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Gateway(GatewayError::Configuration(_)) | Self::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conversation(_) => "CONVERSATION_ERROR",
            Self::BookProcessing(_) => "BOOK_PROCESSING_ERROR",
            Self::Domain(DomainError::InvalidPhoneNumber(_)) => "INVALID_PHONE_NUMBER",
            Self::Gateway(GatewayError::Llm(_)) => "LLM_ERROR",
            Self::Gateway(GatewayError::MessageDelivery(_)) => "MESSAGE_DELIVERY_ERROR",
            Self::Gateway(GatewayError::Configuration(_)) | Self::Repository(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the error message is safe to show to API callers
    fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

/// Error response body structure
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details,
            },
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Render the body with `status`
    ///
    /// The body is also kept as a response extension so the request-id
    /// middleware can stamp `request_id` onto it.
    #[must_use]
    pub fn into_response_with(self, status: StatusCode) -> Response {
        let mut response = (status, Json(&self)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::UseCase(uc_error) = self;

        let details = if let UseCaseError::Validation(errors) = &uc_error {
            Some(
                errors
                    .iter()
                    .map(|e| FieldError {
                        field: String::new(),
                        message: e.clone(),
                    })
                    .collect(),
            )
        } else {
            None
        };
        let message = if uc_error.is_internal() {
            tracing::error!(error = %uc_error, "Request failed with internal error");
            "Internal server error".to_string()
        } else {
            tracing::warn!(error = %uc_error, "Request failed");
            uc_error.to_string()
        };

        ErrorResponse::new(uc_error.error_code(), message, details)
            .into_response_with(uc_error.status_code())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::UseCase(UseCaseError::Validation(vec![rejection.body_text()]))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map_or("invalid", |m| m.as_ref())
                    )
                })
            })
            .collect();
        ApiError::UseCase(UseCaseError::Validation(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_failures_map_to_bad_request() {
        let errors = [
            UseCaseError::Conversation("No responses generated from books".into()),
            UseCaseError::BookProcessing("boom".into()),
            UseCaseError::Gateway(GatewayError::Llm("quota".into())),
            UseCaseError::Gateway(GatewayError::MessageDelivery("rejected".into())),
            UseCaseError::Domain(DomainError::InvalidPhoneNumber(String::new())),
        ];

        for error in errors {
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST, "{error}");
        }
    }

    #[test]
    fn storage_failures_are_internal() {
        let error = UseCaseError::Repository(RepositoryError::Mapping("bad json".into()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error_code(), "INTERNAL_ERROR");
        assert!(error.is_internal());
    }

    #[test]
    fn not_found_carries_resource_and_id() {
        let error = UseCaseError::NotFound {
            resource: "Author".into(),
            id: "Slavoj Zizek".into(),
        };
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Author with id 'Slavoj Zizek' not found");
    }
}
