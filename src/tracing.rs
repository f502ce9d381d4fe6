use std::io;

use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Default filter for the storefront server when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,her_store=debug,actix_web=info,reqwest=warn";

/// Quieter default for the CLI; its stdout carries JSON only.
pub const CLI_FILTER: &str = "warn,her_store=info";

/// Where formatted events are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    /// Keeps stdout free for machine-readable output.
    Stderr,
}

/// Install the global fmt subscriber for a server process (stdout).
///
/// `default_filter` applies only when `RUST_LOG` is not set.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    init_tracing_to(default_filter, LogSink::Stdout)
}

pub fn init_tracing_to(default_filter: &str, sink: LogSink) -> Result<(), anyhow::Error> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true);

    let installed = match sink {
        LogSink::Stdout => builder.with_writer(io::stdout).try_init(),
        LogSink::Stderr => builder.with_writer(io::stderr).with_ansi(false).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
