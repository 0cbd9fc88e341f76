//! Carrying a logger through a [`Context`].

use crate::context::Context;
use crate::logging::{create_logger, Field, Logger};

/// Key of the one slot the logger is stored under. Private, so no caller
/// can read, overwrite or collide with it.
struct LoggerKey;

/// Return a new context holding `logger`.
pub fn attach_logger(ctx: &Context, logger: Logger) -> Context {
    ctx.with_value::<LoggerKey, _>(logger)
}

/// The logger attached to `ctx`, or a default one from [`create_logger`].
pub fn logger_from(ctx: &Context) -> Logger {
    match ctx.get::<LoggerKey, Logger>() {
        Some(logger) => logger.clone(),
        None => create_logger(),
    }
}

/// Return a new context whose logger adds `fields` to every record.
pub fn attach_fields<I, F>(ctx: &Context, fields: I) -> Context
where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
{
    let logger = logger_from(ctx).with(fields);
    attach_logger(ctx, logger)
}
