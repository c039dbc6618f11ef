//! Structured logging.
//!
//! # Responsibilities
//! - Pick the presentation (human or structured) once at startup
//! - Install the global `tracing` subscriber writing to stdout
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON lines for anything but local development, pretty lines locally
//! - `RUST_LOG` overrides the default filter; request gating is separate

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable consulted to pick the presentation.
pub const ENV_VAR: &str = "ENV";

const DEFAULT_FILTER: &str = "webify=debug";

/// Log output presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerKind {
    /// Readable lines, colored when stdout is a terminal.
    Human,
    /// One JSON object per line, with correlation identifiers.
    Structured,
}

impl LoggerKind {
    /// `Human` only when the value is exactly `localhost`.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("localhost") => LoggerKind::Human,
            _ => LoggerKind::Structured,
        }
    }

    /// Read [`ENV_VAR`] from the process environment.
    pub fn detect() -> Self {
        Self::from_env_value(std::env::var(ENV_VAR).ok().as_deref())
    }
}

/// Install the global subscriber for `kind`.
///
/// Fails if a subscriber is already installed.
pub fn init(kind: LoggerKind) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match kind {
        LoggerKind::Human => registry
            .with(human_layer(std::io::stdout, std::io::stdout().is_terminal()))
            .try_init(),
        LoggerKind::Structured => registry.with(structured_layer(std::io::stdout)).try_init(),
    }
}

/// Readable lines without the target column.
pub fn human_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer().with_writer(writer).with_ansi(ansi).with_target(false)
}

/// One flattened JSON object per event, with source location.
pub fn structured_layer<S, W>(writer: W) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(writer)
}
