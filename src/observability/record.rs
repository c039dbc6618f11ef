//! Request records handed to the logging sink.

use std::time::Duration;

use serde::Serialize;

use crate::observability::LogLevel;

/// One entry of the header group of a verbose record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderAttribute {
    pub name: String,
    pub value: String,
}

impl HeaderAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// What a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Emitted before the request is handled (debug threshold only).
    Started,
    /// Emitted once the response is ready.
    Completed,
}

/// Attributes describing one request, built once and then only read.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub kind: RecordKind,
    pub level: LogLevel,
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HeaderAttribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Error message followed by its sources, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error: Vec<String>,
}

impl LogRecord {
    /// A bare record; the request logger fills in the rest.
    pub fn new(kind: RecordKind, level: LogLevel, method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind,
            level,
            method: method.into(),
            path: path.into(),
            query: None,
            status: None,
            duration_ms: None,
            request_id: None,
            remote_addr: None,
            protocol: None,
            user_agent: None,
            referer: None,
            headers: Vec::new(),
            body: None,
            error: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: u16, elapsed: Duration) -> Self {
        self.status = Some(status);
        self.duration_ms = Some(elapsed.as_micros() as f64 / 1000.0);
        self
    }

    /// Record an error and its chain of sources.
    pub fn with_error(mut self, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut current = Some(err);
        while let Some(e) = current {
            self.error.push(e.to_string());
            current = e.source();
        }
        self
    }

    /// Message line for the record.
    pub fn message(&self) -> String {
        match (self.kind, self.status) {
            (RecordKind::Completed, Some(status)) => {
                format!("{} {} => HTTP {}", self.method, self.path, status)
            }
            _ => format!("{} {}", self.method, self.path),
        }
    }
}
