//! Cache-Control policy.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// `Cache-Control` value when caching is enabled (one year).
pub const LONG_LIVED: &str = "max-age=31536000";

/// `Cache-Control` value when caching is disabled.
pub const NO_CACHE: &str = "no-cache, no-store, no-transform, must-revalidate, private, max-age=0";

/// Unix epoch, for `Expires`.
pub const EPOCH: &str = "Thu, 01 Jan 1970 00:00:00 UTC";

/// Conditional request headers removed so the responder never answers 304.
pub const ETAG_HEADERS: [HeaderName; 6] = [
    header::ETAG,
    header::IF_MODIFIED_SINCE,
    header::IF_MATCH,
    header::IF_NONE_MATCH,
    header::IF_RANGE,
    header::IF_UNMODIFIED_SINCE,
];

const X_ACCEL_EXPIRES: HeaderName = HeaderName::from_static("x-accel-expires");

/// Which cache headers responses carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Clients and proxies may keep responses for a year.
    LongLived,
    /// Nothing may be stored anywhere.
    NoCache,
}

impl CachePolicy {
    pub fn from_flag(cache: bool) -> Self {
        if cache {
            CachePolicy::LongLived
        } else {
            CachePolicy::NoCache
        }
    }

    /// Install this policy's middleware on `router`.
    pub fn apply(self, router: Router) -> Router {
        match self {
            CachePolicy::LongLived => router.layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static(LONG_LIVED),
            )),
            CachePolicy::NoCache => router.layer(middleware::from_fn(no_cache)),
        }
    }
}

/// Strip validators from the request and forbid caching of the response.
pub async fn no_cache(mut request: Request<Body>, next: Next) -> Response {
    for name in ETAG_HEADERS {
        request.headers_mut().remove(&name);
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(header::EXPIRES, HeaderValue::from_static(EPOCH));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(X_ACCEL_EXPIRES, HeaderValue::from_static("0"));
    response
}
