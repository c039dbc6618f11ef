//! Per-request context and correlation identifiers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Echo the ID back in the `x-request-id` response header
//! - Snapshot the request fields the logger needs before the body is consumed

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, Version};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use uuid::Uuid;

/// Header carrying the correlation identifier.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 correlation identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeCorrelationId;

impl MakeRequestId for MakeCorrelationId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Layer assigning a fresh ID to requests that arrive without one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeCorrelationId> {
    SetRequestIdLayer::x_request_id(MakeCorrelationId)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Access to the correlation identifier of a request.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .or_else(|| {
                self.headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
            })
    }
}

/// Request fields captured before the request is handed on.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub version: Version,
    pub headers: HeaderMap,
    pub remote_addr: Option<SocketAddr>,
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn from_request(request: &Request<Body>) -> Self {
        Self {
            method: request.method().clone(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            version: request.version(),
            headers: request.headers().clone(),
            remote_addr: request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0),
            request_id: request.request_id().map(str::to_string),
        }
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.header(header::USER_AGENT)
    }

    pub fn referer(&self) -> Option<&str> {
        self.header(header::REFERER)
    }

    fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_captures_request_line() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("http://localhost/upload?name=a.txt")
            .header("user-agent", "curl/8.0")
            .header(X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();

        let ctx = RequestContext::from_request(&request);
        assert_eq!(ctx.method, Method::POST);
        assert_eq!(ctx.path, "/upload");
        assert_eq!(ctx.query.as_deref(), Some("name=a.txt"));
        assert_eq!(ctx.user_agent(), Some("curl/8.0"));
        assert_eq!(ctx.referer(), None);
        assert_eq!(ctx.request_id.as_deref(), Some("abc-123"));
        assert!(ctx.remote_addr.is_none());
    }

    #[test]
    fn generated_ids_are_uuids() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let mut make = MakeCorrelationId;
        let a = make.make_request_id(&request).unwrap();
        let b = make.make_request_id(&request).unwrap();
        assert_ne!(a.header_value(), b.header_value());
        assert!(Uuid::parse_str(a.header_value().to_str().unwrap()).is_ok());
    }

    #[test]
    fn request_id_prefers_extension() {
        let mut request = Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(RequestId::new("from-layer".parse().unwrap()));
        assert_eq!(request.request_id(), Some("from-layer"));
    }
}
