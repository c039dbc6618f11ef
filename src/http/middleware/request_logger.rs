//! Request logging middleware.
//!
//! Emits one record per completed request, gated by the configured
//! threshold. At the `debug` threshold a record is also emitted when the
//! request starts.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::ServerConfig;
use crate::http::request::RequestContext;
use crate::observability::{classify_headers, LogLevel, LogRecord, RecordKind, RecordSink};

/// Longest body prefix copied into a record.
pub const MAX_LOGGED_BODY: usize = 1024;

/// Settings and sink for the request logger.
pub struct RequestLogger {
    sink: Arc<dyn RecordSink>,
    threshold: LogLevel,
    verbose: bool,
    log_body: bool,
}

impl RequestLogger {
    pub fn new(config: &ServerConfig, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            sink,
            threshold: config.log_level,
            verbose: config.debug,
            log_body: config.log_body,
        }
    }

    fn record(&self, ctx: &RequestContext, kind: RecordKind, level: LogLevel) -> LogRecord {
        let mut record = LogRecord::new(kind, level, ctx.method.as_str(), ctx.path.as_str());
        record.query = ctx.query.clone();
        record.request_id = ctx.request_id.clone();

        if self.verbose {
            record.remote_addr = ctx.remote_addr.map(|addr| addr.to_string());
            record.protocol = Some(format!("{:?}", ctx.version));
            record.user_agent = ctx.user_agent().map(str::to_string);
            record.referer = ctx.referer().map(str::to_string);
            record.headers = classify_headers(&ctx.headers, true);
        }
        record
    }

    fn emit(&self, record: LogRecord) {
        if self.threshold.permits(record.level) {
            self.sink.emit(&record);
        }
    }
}

pub async fn request_logger(
    State(logger): State<Arc<RequestLogger>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let ctx = RequestContext::from_request(&request);

    logger.emit(logger.record(&ctx, RecordKind::Started, LogLevel::Debug));

    let (request, body) = if logger.log_body {
        let (parts, body) = request.into_parts();
        match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => (
                Request::from_parts(parts, Body::from(bytes.clone())),
                Some(bytes),
            ),
            Err(err) => {
                let response =
                    (StatusCode::BAD_REQUEST, "failed to read request body").into_response();
                let status = response.status();
                let record = logger
                    .record(&ctx, RecordKind::Completed, LogLevel::for_response(&ctx.method, status))
                    .with_status(status.as_u16(), start.elapsed())
                    .with_error(&err);
                logger.emit(record);
                return response;
            }
        }
    } else {
        (request, None)
    };

    let response = next.run(request).await;

    let status = response.status();
    let mut record = logger
        .record(&ctx, RecordKind::Completed, LogLevel::for_response(&ctx.method, status))
        .with_status(status.as_u16(), start.elapsed());
    record.body = body.as_ref().map(body_text);
    logger.emit(record);

    response
}

/// Printable prefix of a request body.
pub fn body_text(body: &Bytes) -> String {
    if body.len() <= MAX_LOGGED_BODY {
        return String::from_utf8_lossy(body).into_owned();
    }
    format!(
        "{}...(+{} bytes)",
        String::from_utf8_lossy(&body[..MAX_LOGGED_BODY]),
        body.len() - MAX_LOGGED_BODY
    )
}
