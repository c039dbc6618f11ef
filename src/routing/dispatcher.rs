//! Dispatch mode selection.

use std::path::PathBuf;

use axum::Router;

use crate::config::ServerConfig;
use crate::routing::{echo, file_server, MountError};

/// What terminal responder handles requests, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Every request gets its own body back.
    Echo,
    /// Files under `root` are served below `mount`.
    Serve { mount: String, root: PathBuf },
}

impl Mode {
    pub fn from_config(config: &ServerConfig) -> Self {
        if config.echo {
            Mode::Echo
        } else {
            Mode::Serve {
                mount: config.mount.clone(),
                root: config.root.clone(),
            }
        }
    }

    /// Build the routes for this mode.
    pub fn router(&self) -> Result<Router, MountError> {
        match self {
            Mode::Echo => Ok(echo::router()),
            Mode::Serve { mount, root } => file_server::mount(Router::new(), mount, root),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Echo => "echo",
            Mode::Serve { .. } => "serve",
        }
    }
}
