//! Static file responder mounted under a URL prefix.
//!
//! Byte serving itself (content types, ranges, conditional requests, index
//! files) is delegated to `tower_http::services::ServeDir`.

use std::path::Path;

use axum::{
    body::Body,
    http::{header, uri::PathAndQuery, HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use thiserror::Error;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Characters that would turn a mount path into a route pattern.
pub const ROUTE_PARAM_CHARS: [char; 3] = ['{', '}', '*'];

/// Whether `mount` would be read as a route pattern rather than a literal
/// prefix. Segments starting with `:` are rejected by the router as
/// old-style captures.
pub fn has_route_params(mount: &str) -> bool {
    mount.contains(ROUTE_PARAM_CHARS) || mount.split('/').any(|segment| segment.starts_with(':'))
}

/// Error type for mount registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("file server does not permit URL parameters: {0:?}")]
    RouteParams(String),

    #[error("mount path must start with '/': {0:?}")]
    NotAbsolute(String),
}

/// Files under `root`, addressed relative to a URL prefix.
#[derive(Debug, Clone)]
struct StaticFiles {
    /// Mount path without its trailing slash; empty for `/`.
    prefix: String,
    files: ServeDir,
}

impl StaticFiles {
    async fn serve(self, mut request: Request<Body>) -> Response {
        let path = strip_prefix(request.uri().path(), &self.prefix);
        match rewrite_path(request.uri(), &path) {
            Ok(uri) => *request.uri_mut() = uri,
            Err(_) => return StatusCode::BAD_REQUEST.into_response(),
        }

        let mut response = match self.files.oneshot(request).await {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        };

        // Directory redirects are relative to the stripped path.
        if response.status().is_redirection() && !self.prefix.is_empty() {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .filter(|loc| loc.starts_with('/'))
                .and_then(|loc| HeaderValue::from_str(&format!("{}{}", self.prefix, loc)).ok());
            if let Some(location) = location {
                response.headers_mut().insert(header::LOCATION, location);
            }
        }
        response
    }
}

/// Register the directory at `root` under `mount` on `router`.
///
/// A mount path that does not end in `/` also gets a `GET` route for the
/// bare path, redirecting permanently to the slash form so relative links
/// in served pages resolve.
pub fn mount(router: Router, mount: &str, root: &Path) -> Result<Router, MountError> {
    if has_route_params(mount) {
        return Err(MountError::RouteParams(mount.to_string()));
    }
    if !mount.starts_with('/') {
        return Err(MountError::NotAbsolute(mount.to_string()));
    }

    let static_files = StaticFiles {
        prefix: mount.trim_end_matches('/').to_string(),
        files: ServeDir::new(root),
    };
    let handler = move |request: Request<Body>| static_files.clone().serve(request);

    let mut router = router;
    let mut base = mount.to_string();
    if !base.ends_with('/') {
        let target = format!("{}/", base);
        router = router.route(&base, get(move || redirect(target)));
        base.push('/');
    }

    Ok(router
        .route(&base, get(handler.clone()))
        .route(&format!("{}{{*path}}", base), get(handler)))
}

async fn redirect(target: String) -> Response {
    match HeaderValue::from_str(&target) {
        Ok(location) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Path relative to the mount, always starting with `/`.
fn strip_prefix(path: &str, prefix: &str) -> String {
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{}", rest)
    }
}

fn rewrite_path(uri: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}
