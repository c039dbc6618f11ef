//! Configuration loading from command-line flags.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::cli::Cli;
use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::observability::LogLevel;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine working directory: {0}")]
    WorkingDir(#[from] std::io::Error),

    #[error("{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve the serve directory against the working directory.
///
/// Empty and `.` mean the working directory itself; relative paths are
/// joined onto it.
pub fn resolve_root(dir: &str, cwd: &Path) -> PathBuf {
    if dir.is_empty() || dir == "." {
        return cwd.to_path_buf();
    }
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Build and validate the server configuration from parsed flags.
///
/// An unrecognized `--log-level` is not an error: it falls back to `info`
/// with a warning.
pub fn load_config(cli: &Cli, cwd: &Path) -> Result<ServerConfig, ConfigError> {
    let config = ServerConfig {
        host: cli.host.clone(),
        port: cli.port,
        root: resolve_root(&cli.dir, cwd),
        mount: cli.mount.clone(),
        cache: cli.cache,
        debug: cli.debug,
        echo: cli.echo,
        log_body: cli.echo || cli.log_body,
        silent: cli.silent,
        log_level: LogLevel::resolve(&cli.log_level),
        no_banner: cli.no_banner,
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration relative to the process working directory.
pub fn load_from_env(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let cwd = std::env::current_dir()?;
    load_config(cli, &cwd)
}
