//! Demo HTTP server wired up with context-scoped logging.
//!
//! ```text
//! LOG_FORMAT=console LOG_LEVEL=debug appkit-logging --bind 127.0.0.1:8080
//! curl -H 'x-request-id: demo-1' http://127.0.0.1:8080/
//! ```

use std::path::PathBuf;

use axum::{middleware, routing::get, Extension, Router};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use appkit_logging::config::load_config;
use appkit_logging::http::request_context;
use appkit_logging::{
    attach_logger, create_logger_from, logger_from, Context, Field, Logger, RawLogConfig,
};

#[derive(Parser)]
#[command(name = "appkit-logging")]
#[command(about = "Demo server for context-scoped structured logging", long_about = None)]
struct Cli {
    /// TOML file with `format` and `level`; LOG_FORMAT and LOG_LEVEL override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (raw, config_error) = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(file) => (file.overlay(RawLogConfig::from_env()), None),
            Err(e) => (RawLogConfig::from_env(), Some((path.clone(), e))),
        },
        None => (RawLogConfig::from_env(), None),
    };

    let logger = create_logger_from(&raw);
    if let Some((path, e)) = config_error {
        logger.warn(
            "Failed to load logging config, using environment only",
            &[
                Field::display("path", path.display()),
                Field::display("error", e),
            ],
        );
    }

    let ctx = attach_logger(&Context::background(), logger.clone());

    let listener = TcpListener::bind(&cli.bind).await?;
    logger.info(
        "Starting HTTP server",
        &[Field::display("address", listener.local_addr()?)],
    );

    let app = Router::new()
        .route("/", get(hello))
        .layer(middleware::from_fn_with_state(ctx, request_context))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(logger.clone()))
        .await?;

    logger.info("Shutdown complete", &[]);
    Ok(())
}

async fn hello(Extension(ctx): Extension<Context>) -> &'static str {
    logger_from(&ctx).debug("Saying hello", &[Field::new("greeting", "hello")]);
    "hello\n"
}

async fn shutdown_signal(logger: Logger) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger.error("Failed to install Ctrl+C handler", &[Field::display("error", e)]);
        std::future::pending::<()>().await;
    }
    logger.info("Shutdown signal received", &[]);
}
