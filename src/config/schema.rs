//! Configuration schema definitions.
//!
//! `ServerConfig` is the resolved snapshot of every setting the request
//! pipeline consults. It is assembled once by the loader and then shared
//! read-only.

use std::path::PathBuf;

use serde::Serialize;

use crate::observability::LogLevel;

/// Root configuration for the server.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Hostname or IP to bind.
    pub host: String,

    /// TCP port to bind.
    pub port: u16,

    /// Absolute path of the directory being served.
    pub root: PathBuf,

    /// URL prefix the static file responder is mounted under.
    pub mount: String,

    /// Long-lived `Cache-Control` instead of no-cache headers.
    pub cache: bool,

    /// Verbose request records, including request headers.
    pub debug: bool,

    /// Echo request bodies instead of serving files.
    pub echo: bool,

    /// Include request bodies in request records.
    ///
    /// Always on in echo mode.
    pub log_body: bool,

    /// Drop the request logger from the middleware chain.
    pub silent: bool,

    /// Minimum severity a request record needs to be emitted.
    pub log_level: LogLevel,

    /// Skip the startup banner.
    pub no_banner: bool,
}

impl ServerConfig {
    /// Address string in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            root: PathBuf::from("."),
            mount: "/".to_string(),
            cache: false,
            debug: false,
            echo: false,
            log_body: false,
            silent: false,
            log_level: LogLevel::Info,
            no_banner: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
