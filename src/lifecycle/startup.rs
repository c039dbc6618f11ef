//! Startup orchestration.
//!
//! # Responsibilities
//! - Install the logger and load the configuration
//! - Print the banner
//! - Build the router, bind the listener and serve until shutdown

use std::io::Write;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{loader, Cli, ConfigError, ServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, LoggerKind, TracingSink};
use crate::routing::MountError;

const RULE: &str = "================================================================================";

/// Fatal errors before the server starts accepting requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Mount(#[from] MountError),

    #[error("listen tcp {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install logger: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Write the startup banner.
pub fn print_banner(config: &ServerConfig, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Serving:  {}", config.root.display())?;
    writeln!(out, "URL:      http://{}", config.bind_address())?;
    writeln!(out, "Cache:    {}", if config.cache { "on" } else { "off" })?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    Ok(())
}

/// Bind the configured address.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, StartupError> {
    let address = config.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Start the server from parsed flags and run until shutdown.
pub async fn run(cli: Cli) -> Result<(), StartupError> {
    let kind = LoggerKind::detect();
    logging::init(kind)?;

    let config = loader::load_from_env(&cli)?;

    if !config.no_banner {
        print_banner(&config, &mut std::io::stdout().lock())?;
    }

    tracing::debug!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "Configuration loaded"
    );

    let server = HttpServer::new(config, Arc::new(TracingSink::new(kind)))?;
    let listener = bind(server.config()).await?;

    let shutdown = Arc::new(Shutdown::new());
    let signalled = shutdown.signalled();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown));

    server.run(listener, signalled).await?;
    Ok(())
}
