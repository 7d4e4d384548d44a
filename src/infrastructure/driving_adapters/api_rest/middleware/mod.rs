//! API Middleware
//!
//! Authentication and request correlation for the REST API.

pub mod auth;
pub mod request_id;

pub use auth::{AuthenticatedOperator, JwtAuth};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
