//! Axum middleware.

pub mod request_context;
