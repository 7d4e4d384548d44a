//! Request ID Middleware
//!
//! Tags every request with an id taken from `x-request-id` or freshly
//! generated, runs it inside a span carrying that id and echoes it back.

use axum::{
    body::Body,
    http::{
        header::{HeaderName, CONTENT_LENGTH},
        HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::shared::errors::ErrorResponse;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID stored in request extensions
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub async fn request_id_middleware(request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(RequestId::new, |v| RequestId(v.to_string()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri().path(),
    );

    let response = next.run(request).instrument(span).await;
    let mut response = stamp_error_body(response, &request_id);

    if let Ok(header_value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), header_value);
    }

    response
}

/// Rewrite an `ErrorResponse` body so it carries the request id
fn stamp_error_body(response: Response, request_id: &RequestId) -> Response {
    let (mut parts, body) = response.into_parts();
    let Some(mut error) = parts.extensions.remove::<ErrorResponse>() else {
        return Response::from_parts(parts, body);
    };

    error.request_id = Some(request_id.to_string());
    match serde_json::to_vec(&error) {
        Ok(bytes) => {
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to attach request id to error body");
            Response::from_parts(parts, body)
        }
    }
}
