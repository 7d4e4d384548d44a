//! Driving Adapters
//!
//! Entry points that drive the application:
//! - Provider webhooks and the admin REST API
//! - DTOs for request/response

pub mod api_rest;
