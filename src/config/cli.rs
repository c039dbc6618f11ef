//! Command-line flags.

use clap::Parser;

/// Serve a directory over HTTP, or echo request bodies back.
#[derive(Parser, Debug, Clone)]
#[command(name = "webify", version, about, long_about = None)]
pub struct Cli {
    /// HTTP server port
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// HTTP server hostname
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Directory to serve
    #[arg(long, default_value = ".")]
    pub dir: String,

    /// URL prefix the directory is served under
    #[arg(long, default_value = "/")]
    pub mount: String,

    /// Enable Cache-Control for content
    #[arg(long)]
    pub cache: bool,

    /// Debug mode, printing all network request details
    #[arg(long)]
    pub debug: bool,

    /// Echo back request body, useful for debugging
    #[arg(long)]
    pub echo: bool,

    /// Log request bodies even when not echoing them
    #[arg(long)]
    pub log_body: bool,

    /// Do not output any request logs
    #[arg(long)]
    pub silent: bool,

    /// Do not output banner
    #[arg(long)]
    pub no_banner: bool,

    /// Set the logging level:
    ///   debug: log both request starts & responses (incl. OPTIONS)
    ///   info: log responses (excl. OPTIONS)
    ///   warn: log 4xx and 5xx responses only (except for 429)
    ///   error: log 5xx responses only
    #[arg(long, default_value = "info", verbatim_doc_comment)]
    pub log_level: String,
}
