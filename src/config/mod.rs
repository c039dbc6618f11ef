//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags
//!     → cli.rs (clap parse)
//!     → loader.rs (resolve directory, level, mode)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup and never mutated afterwards
//! - Every component receives the config explicitly; nothing reads flags globally
//! - Validation separates syntactic (clap) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::ServerConfig;
