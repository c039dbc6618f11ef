//! Echo responder.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

/// Router answering every method and path with the request body.
pub fn router() -> Router {
    Router::new()
        .route("/", any(echo_handler))
        .route("/{*path}", any(echo_handler))
}

/// Repeat the request body back with status 200.
pub async fn echo_handler(request: Request<Body>) -> Response {
    match axum::body::to_bytes(request.into_body(), usize::MAX).await {
        Ok(body) => (StatusCode::OK, Body::from(body)).into_response(),
        Err(err) => {
            tracing::debug!(error = %err, "Failed to read request body");
            (StatusCode::BAD_REQUEST, "failed to read request body").into_response()
        }
    }
}
