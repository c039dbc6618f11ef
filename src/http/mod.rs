//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware assembly)
//!     → request.rs (request ID, request context)
//!     → middleware/ (request logger → cache policy → CORS)
//!     → routing (echo or static files)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use request::{RequestContext, RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
