//! Request interceptors applied before dispatch.
//!
//! # Order
//! ```text
//! request_logger (absent when silent)
//!     → cache (long-lived or no-cache, exactly one)
//!     → cors (answers OPTIONS itself)
//!     → dispatcher
//! ```

pub mod cache;
pub mod cors;
pub mod request_logger;

pub use cache::CachePolicy;
pub use request_logger::RequestLogger;
