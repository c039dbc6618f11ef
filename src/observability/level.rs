//! Log level resolution and request severity.

use std::fmt;

use axum::http::{Method, StatusCode};
use serde::Serialize;

/// Severity of a request record, ordered from most to least verbose.
///
/// The configured level acts as a minimum threshold: a record is emitted
/// only when its severity is at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Log both request starts and responses, including `OPTIONS`.
    Debug,
    /// Log responses, excluding `OPTIONS`.
    Info,
    /// Log 4xx and 5xx responses only, except 429.
    Warn,
    /// Log 5xx responses only.
    Error,
}

impl LogLevel {
    /// Parse a level name, case-insensitively.
    ///
    /// Unrecognized names fall back to [`LogLevel::Info`] with a warning.
    pub fn resolve(name: &str) -> Self {
        match Self::parse(name) {
            Some(level) => level,
            None => {
                tracing::warn!(level = %name, "Invalid log level specified, defaulting to info");
                LogLevel::Info
            }
        }
    }

    /// Parse a level name without the fallback.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// Severity of a completed request.
    ///
    /// `OPTIONS` is always debug so preflights only show at the debug
    /// threshold. Rate-limited responses count as info.
    pub fn for_response(method: &Method, status: StatusCode) -> Self {
        if method == Method::OPTIONS {
            LogLevel::Debug
        } else if status.is_server_error() {
            LogLevel::Error
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            LogLevel::Info
        } else if status.is_client_error() {
            LogLevel::Warn
        } else {
            LogLevel::Info
        }
    }

    /// Whether a record of severity `event` passes this threshold.
    pub fn permits(self, event: LogLevel) -> bool {
        event >= self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
