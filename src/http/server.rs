//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router for the selected mode
//! - Wire up middleware (request ID, request logger, cache policy, CORS)
//! - Bind server to listener
//! - Stop accepting when the shutdown signal fires

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::middleware::cors::cors;
use crate::http::middleware::request_logger::request_logger;
use crate::http::middleware::{CachePolicy, RequestLogger};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::RecordSink;
use crate::routing::{Mode, MountError};

/// HTTP server for a directory or for echoing.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
    mode: Mode,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the mount path cannot be registered.
    pub fn new(config: ServerConfig, sink: Arc<dyn RecordSink>) -> Result<Self, MountError> {
        let mode = Mode::from_config(&config);
        let router = Self::build_router(&config, &mode, sink)?;
        Ok(Self {
            router,
            config: Arc::new(config),
            mode,
        })
    }

    /// Build the axum router with all middleware layers.
    ///
    /// Outermost first: request ID, request logger (unless silent), cache
    /// policy, CORS, then the mode's routes.
    pub fn build_router(
        config: &ServerConfig,
        mode: &Mode,
        sink: Arc<dyn RecordSink>,
    ) -> Result<Router, MountError> {
        let router = mode.router()?.layer(middleware::from_fn(cors));
        let router = CachePolicy::from_flag(config.cache).apply(router);

        let router = if config.silent {
            router
        } else {
            let logger = Arc::new(RequestLogger::new(config, sink));
            router.layer(middleware::from_fn_with_state(logger, request_logger))
        };

        Ok(router
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer()))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = self.mode.name(),
            root = %self.config.root.display(),
            cache = self.config.cache,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
