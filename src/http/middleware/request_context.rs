//! Per-request logging context.
//!
//! Derives a child [`Context`] for every request whose logger carries the
//! request id, method and path, and stores it in the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::context::Context;
use crate::logging::{attach_fields, logger_from, Field};

/// Header read for the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware deriving the request context from the base context in state.
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn request_context(
    State(base): State<Context>,
    mut req: Request,
    next: Next,
) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let ctx = attach_fields(
        &base,
        [
            Field::new("request_id", request_id),
            Field::new("method", req.method().as_str()),
            Field::new("path", req.uri().path()),
        ],
    );
    let logger = logger_from(&ctx);
    req.extensions_mut().insert(ctx);

    let response = next.run(req).await;

    logger.info(
        "Request completed",
        &[Field::new("status", response.status().as_u16())],
    );
    response
}

/// The context stored by [`request_context`], or an empty one.
pub fn context_of<B>(req: &axum::http::Request<B>) -> Context {
    req.extensions()
        .get::<Context>()
        .cloned()
        .unwrap_or_default()
}
