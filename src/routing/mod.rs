//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     ServerConfig
//!     → dispatcher.rs (pick Mode once: Echo or Serve)
//!     → echo.rs | file_server.rs (register routes)
//!     → Freeze as immutable axum Router
//!
//! Request:
//!     → Echo: body copied back, any method, any path
//!     → Serve: mount prefix stripped → tower-http ServeDir
//! ```
//!
//! # Design Decisions
//! - Mode is chosen at startup and never changes
//! - Mount paths with route parameters are rejected before serving starts
//! - Exact mount path without trailing slash redirects (301) to the slash form

pub mod dispatcher;
pub mod echo;
pub mod file_server;

pub use dispatcher::Mode;
pub use file_server::MountError;
