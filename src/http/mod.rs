//! HTTP integration.
//!
//! # Data Flow
//! ```text
//! request
//!     → tower-http SetRequestId (x-request-id, UUID when absent)
//!     → middleware/request_context.rs (child Context with request fields)
//!     → handler (Extension<Context> → logger_from)
//! ```

pub mod middleware;

pub use middleware::request_context::{context_of, request_context, REQUEST_ID_HEADER};
