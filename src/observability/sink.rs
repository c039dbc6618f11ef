//! Logging sinks.
//!
//! A sink accepts finished request records. The production sink forwards
//! them to `tracing`, where the subscriber picked by [`LoggerKind`] renders
//! them; tests swap in a sink that keeps records in memory.

use std::sync::{Arc, Mutex};

use crate::observability::logging::LoggerKind;
use crate::observability::record::{HeaderAttribute, LogRecord};
use crate::observability::LogLevel;

/// Destination for request records.
///
/// Emission must not fail the request, so there is no error channel.
pub trait RecordSink: Send + Sync + 'static {
    fn emit(&self, record: &LogRecord);
}

/// Limits applied by the human-readable presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preview {
    /// Error sources shown after the error itself.
    pub max_error_frames: usize,
    /// Header entries shown before eliding the rest.
    pub max_items: usize,
}

impl Preview {
    pub const HUMAN: Preview = Preview {
        max_error_frames: 5,
        max_items: 20,
    };

    pub const UNLIMITED: Preview = Preview {
        max_error_frames: usize::MAX,
        max_items: usize::MAX,
    };

    /// Render a header group as `name=value` pairs.
    pub fn headers(&self, headers: &[HeaderAttribute]) -> String {
        let mut out = headers
            .iter()
            .take(self.max_items)
            .map(|h| format!("{}={}", h.name, h.value))
            .collect::<Vec<_>>()
            .join(" ");
        if headers.len() > self.max_items {
            out.push_str(&format!(" ...(+{} more)", headers.len() - self.max_items));
        }
        out
    }

    /// Render an error chain, outermost first.
    pub fn error_chain(&self, chain: &[String]) -> String {
        let shown = chain.len().min(self.max_error_frames.saturating_add(1));
        let mut out = chain[..shown].join(": ");
        if chain.len() > shown {
            out.push_str(&format!(": ...(+{} more)", chain.len() - shown));
        }
        out
    }
}

/// Sink that emits records as `tracing` events.
#[derive(Debug, Clone)]
pub struct TracingSink {
    kind: LoggerKind,
}

impl TracingSink {
    pub fn new(kind: LoggerKind) -> Self {
        Self { kind }
    }

    fn preview(&self) -> Preview {
        match self.kind {
            LoggerKind::Human => Preview::HUMAN,
            LoggerKind::Structured => Preview::UNLIMITED,
        }
    }
}

macro_rules! emit_at {
    ($level:expr, $record:ident, $request_id:ident, $headers:ident, $error:ident) => {
        tracing::event!(
            $level,
            request_id = $request_id,
            method = %$record.method,
            path = %$record.path,
            query = $record.query.as_deref(),
            status = $record.status,
            duration_ms = $record.duration_ms,
            remote_addr = $record.remote_addr.as_deref(),
            protocol = $record.protocol.as_deref(),
            user_agent = $record.user_agent.as_deref(),
            referer = $record.referer.as_deref(),
            headers = $headers,
            body = $record.body.as_deref(),
            error = $error,
            "{}",
            $record.message()
        )
    };
}

impl RecordSink for TracingSink {
    fn emit(&self, record: &LogRecord) {
        let preview = self.preview();

        // Correlation identifiers only go into structured output.
        let request_id = match self.kind {
            LoggerKind::Structured => record.request_id.as_deref(),
            LoggerKind::Human => None,
        };
        let headers = (!record.headers.is_empty()).then(|| match self.kind {
            LoggerKind::Human => preview.headers(&record.headers),
            LoggerKind::Structured => header_object(&record.headers),
        });
        let error = (!record.error.is_empty()).then(|| preview.error_chain(&record.error));
        let headers = headers.as_deref();
        let error = error.as_deref();

        match record.level {
            LogLevel::Debug => emit_at!(tracing::Level::DEBUG, record, request_id, headers, error),
            LogLevel::Info => emit_at!(tracing::Level::INFO, record, request_id, headers, error),
            LogLevel::Warn => emit_at!(tracing::Level::WARN, record, request_id, headers, error),
            LogLevel::Error => emit_at!(tracing::Level::ERROR, record, request_id, headers, error),
        }
    }
}

/// Header group as a JSON object, keeping header order.
fn header_object(headers: &[HeaderAttribute]) -> String {
    serde_json::Value::Object(
        headers
            .iter()
            .map(|h| (h.name.clone(), serde_json::Value::from(h.value.as_str())))
            .collect::<serde_json::Map<_, _>>(),
    )
    .to_string()
}

/// Sink that keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records emitted so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl RecordSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::capture;
    use crate::observability::record::RecordKind;

    fn attrs(n: usize) -> Vec<HeaderAttribute> {
        (0..n).map(|i| HeaderAttribute::new(format!("x-h{}", i), "v")).collect()
    }

    #[test]
    fn human_preview_caps_headers() {
        let rendered = Preview::HUMAN.headers(&attrs(25));
        assert!(rendered.starts_with("x-h0=v x-h1=v"));
        assert!(rendered.contains("x-h19=v"));
        assert!(!rendered.contains("x-h20=v"));
        assert!(rendered.ends_with("...(+5 more)"));

        assert_eq!(Preview::HUMAN.headers(&attrs(2)), "x-h0=v x-h1=v");
    }

    #[test]
    fn human_preview_caps_error_frames() {
        let chain: Vec<String> = (0..8).map(|i| format!("e{}", i)).collect();
        assert_eq!(
            Preview::HUMAN.error_chain(&chain),
            "e0: e1: e2: e3: e4: e5: ...(+2 more)"
        );
        assert_eq!(Preview::UNLIMITED.error_chain(&chain), chain.join(": "));
    }

    #[test]
    fn header_object_is_valid_json() {
        let headers = vec![
            HeaderAttribute::new("accept", "text/html"),
            HeaderAttribute::new("x-quote", "say \"hi\""),
        ];
        let value: serde_json::Value = serde_json::from_str(&header_object(&headers)).unwrap();
        assert_eq!(value["accept"], "text/html");
        assert_eq!(value["x-quote"], "say \"hi\"");

        let names: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(names, ["accept", "x-quote"]);
    }

    #[test]
    fn memory_sink_keeps_records() {
        let sink = MemorySink::new();
        sink.emit(&LogRecord::new(RecordKind::Completed, LogLevel::Info, "GET", "/"));
        sink.emit(&LogRecord::new(RecordKind::Completed, LogLevel::Warn, "GET", "/missing"));
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].path, "/missing");
    }

    fn failed_request() -> LogRecord {
        let mut record = LogRecord::new(RecordKind::Completed, LogLevel::Error, "GET", "/boom")
            .with_status(500, std::time::Duration::from_millis(1));
        record.request_id = Some("req-7f3a".into());
        record.headers = attrs(25);
        record.error = (0..8).map(|i| format!("e{}", i)).collect();
        record
    }

    #[test]
    fn structured_output_carries_request_id_and_full_groups() {
        let record = failed_request();
        let output = capture::output(LoggerKind::Structured, || {
            TracingSink::new(LoggerKind::Structured).emit(&record)
        });

        let line: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(line["level"], "ERROR");
        assert_eq!(line["message"], "GET /boom => HTTP 500");
        assert_eq!(line["request_id"], "req-7f3a");
        assert_eq!(line["status"], 500);
        assert!(line["error"].as_str().unwrap().ends_with("e6: e7"));

        let headers: serde_json::Value = serde_json::from_str(line["headers"].as_str().unwrap()).unwrap();
        let names: Vec<_> = headers.as_object().unwrap().keys().cloned().collect();
        assert_eq!(names.len(), 25);
        assert_eq!(names[0], "x-h0");
        assert_eq!(names[24], "x-h24");
    }

    #[test]
    fn human_output_omits_request_id_and_caps_groups() {
        let record = failed_request();
        let output = capture::output(LoggerKind::Human, || TracingSink::new(LoggerKind::Human).emit(&record));

        assert!(output.contains("GET /boom => HTTP 500"));
        assert!(!output.contains("request_id"));
        assert!(!output.contains("req-7f3a"));
        assert!(output.contains("x-h19=v"));
        assert!(!output.contains("x-h20=v"));
        assert!(output.contains("...(+5 more)"));
        assert!(output.contains("e5: ...(+2 more)"));
    }

    #[test]
    fn records_use_their_own_severity() {
        let record = LogRecord::new(RecordKind::Completed, LogLevel::Warn, "GET", "/missing")
            .with_status(404, std::time::Duration::from_millis(1));
        let output = capture::output(LoggerKind::Structured, || {
            TracingSink::new(LoggerKind::Structured).emit(&record)
        });
        let line: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(line["level"], "WARN");
        assert!(line.get("request_id").is_none());
    }
}
