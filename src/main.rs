//! webify
//!
//! Serve a directory over HTTP for previews and client debugging, or echo
//! request bodies back.
//!
//! # Request Pipeline
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ request logger ─▶ cache policy ─▶ CORS ─┐
//!                                   (unless silent)   (one of two)          │
//!                                                                           ▼
//!                                                              ┌────────────────────┐
//!                                                              │     dispatcher     │
//!                                                              │  Echo │  Serve     │
//!                                                              └───┬───┴─────┬──────┘
//!                                                                  │         │
//!     Client Response                                      body copied   ServeDir
//!     ◀───────────────────────────────────────────────────────────┴─────────┘
//! ```
//!
//! `ENV=localhost` selects human-readable logs; anything else logs JSON lines.

use std::process::ExitCode;

use clap::Parser;

use webify::config::Cli;
use webify::lifecycle;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match lifecycle::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
