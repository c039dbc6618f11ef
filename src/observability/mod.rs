//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request logger middleware:
//!     → headers.rs (header group for verbose records)
//!     → record.rs (one LogRecord per request)
//!     → level.rs (severity vs. configured threshold)
//!     → sink.rs (RecordSink → tracing events)
//!     → logging.rs (human or JSON subscriber on stdout)
//! ```
//!
//! # Design Decisions
//! - Presentation is chosen once at startup from the environment
//! - Request ID flows into structured records only
//! - Sinks are swappable so tests can inspect records

pub mod headers;
pub mod level;
pub mod logging;
pub mod record;
pub mod sink;

pub use headers::classify_headers;
pub use level::LogLevel;
pub use logging::LoggerKind;
pub use record::{HeaderAttribute, LogRecord, RecordKind};
pub use sink::{MemorySink, RecordSink, TracingSink};
