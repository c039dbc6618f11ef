//! Configuration validation.
//!
//! # Responsibilities
//! - Check the serve directory exists
//! - Check the mount path is a plain, absolute URL prefix (file-serving mode)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::ServerConfig;
use crate::routing::file_server::has_route_params;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The directory to serve does not exist.
    MissingDirectory(String),
    /// The path to serve exists but is not a directory.
    NotADirectory(String),
    /// The mount path contains routing wildcard characters.
    MountWildcard(String),
    /// The mount path does not start with `/`.
    MountNotAbsolute(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingDirectory(dir) => {
                write!(f, "stat {}: no such file or directory", dir)
            }
            ValidationError::NotADirectory(dir) => {
                write!(f, "{}: not a directory", dir)
            }
            ValidationError::MountWildcard(mount) => {
                write!(f, "mount path {:?} must not contain URL parameters", mount)
            }
            ValidationError::MountNotAbsolute(mount) => {
                write!(f, "mount path {:?} must start with '/'", mount)
            }
        }
    }
}

/// Check a resolved configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.root.exists() {
        errors.push(ValidationError::MissingDirectory(
            config.root.display().to_string(),
        ));
    } else if !config.root.is_dir() {
        errors.push(ValidationError::NotADirectory(
            config.root.display().to_string(),
        ));
    }

    // The mount path is only registered when serving files.
    if !config.echo {
        if has_route_params(&config.mount) {
            errors.push(ValidationError::MountWildcard(config.mount.clone()));
        }
        if !config.mount.starts_with('/') {
            errors.push(ValidationError::MountNotAbsolute(config.mount.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(dir: &std::path::Path) -> ServerConfig {
        ServerConfig {
            root: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config(&config_for(dir.path())).is_ok());
    }

    #[test]
    fn reports_every_problem() {
        let mut config = config_for(std::path::Path::new("/definitely/not/here"));
        config.mount = "assets/{id}".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::MissingDirectory(_)));
        assert!(matches!(errors[1], ValidationError::MountWildcard(_)));
        assert!(matches!(errors[2], ValidationError::MountNotAbsolute(_)));
    }

    #[test]
    fn regular_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("index.html");
        std::fs::write(&file, "<h1>hi</h1>").unwrap();

        let errors = validate_config(&config_for(&file)).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NotADirectory(file.display().to_string())]);
        assert!(errors[0].to_string().ends_with(": not a directory"));
    }

    #[test]
    fn colon_segments_are_route_parameters() {
        let dir = tempfile::tempdir().unwrap();
        for mount in ["/:files", "/a/:b"] {
            let mut config = config_for(dir.path());
            config.mount = mount.into();
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors, vec![ValidationError::MountWildcard(mount.to_string())]);
        }
    }

    #[test]
    fn echo_mode_skips_mount_checks() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.echo = true;
        config.mount = "{x}".into();
        assert!(validate_config(&config).is_ok());
    }
}
