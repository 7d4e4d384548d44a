//! JWT Authentication Extractor
//!
//! Guards the admin endpoints with HS256 bearer tokens signed with `jwt.secret`.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ErrorResponse;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (operator ID)
    pub sub: String,
    #[serde(default)]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Operator identity extracted from a valid token
#[derive(Debug, Clone)]
pub struct AuthenticatedOperator {
    pub id: String,
    pub role: Option<String>,
}

impl From<Claims> for AuthenticatedOperator {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

/// JWT authentication extractor
pub struct JwtAuth(pub AuthenticatedOperator);

/// Rejection for missing or invalid tokens
pub struct AuthError {
    message: &'static str,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ErrorResponse::new("UNAUTHORIZED", self.message, None)
            .into_response_with(StatusCode::UNAUTHORIZED)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError {
                message: "Missing Authorization header",
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or(AuthError {
            message: "Invalid Authorization header format",
        })?;

        // Pin the algorithm so a token cannot pick its own
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 60;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt.secret.expose().as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected admin token");
            AuthError {
                message: "Invalid or expired token",
            }
        })?;

        let operator = AuthenticatedOperator::from(token_data.claims);
        tracing::debug!(operator = %operator.id, role = ?operator.role, "Authenticated admin request");
        Ok(JwtAuth(operator))
    }
}
